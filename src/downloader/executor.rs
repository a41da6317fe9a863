//! Download executor backed by the yt-dlp binary
//!
//! yt-dlp performs the fetch, merging and any ffmpeg post-processing; this
//! module only builds its command line and relays its progress output.

use crate::downloader::progress::{parse_progress_line, ProgressSink, PROGRESS_TEMPLATE};
use crate::extractor::find_ytdlp;
use crate::selection::{DownloadPlan, PostProcessor};
use crate::utils::{Result, YtLoaderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info};

/// Lines of stderr kept for the failure message
const STDERR_TAIL_LINES: usize = 20;

/// Fetches and post-processes the streams a plan selects.
#[async_trait]
pub trait DownloadExecutor: Send + Sync {
    /// Run one download, relaying every progress event to `sink`.
    ///
    /// A failure reported by the downloader itself is `YtLoaderError::DownloadError`.
    async fn execute(
        &self,
        url: &str,
        plan: &DownloadPlan,
        output_template: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<()>;
}

/// Executor spawning `yt-dlp` once per download
pub struct YtDlpExecutor {
    ytdlp_path: PathBuf,
}

impl YtDlpExecutor {
    pub fn new() -> Result<Self> {
        let ytdlp_path = find_ytdlp().ok_or(YtLoaderError::YtDlpNotFound)?;
        Ok(Self { ytdlp_path })
    }

    pub fn with_path(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }
}

/// Next line of process output, decoded lossily; `None` at end of stream.
///
/// yt-dlp echoes titles in the console encoding, which need not be UTF-8.
async fn next_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// yt-dlp arguments for a plan, excluding the binary itself
pub fn build_args(url: &str, plan: &DownloadPlan, output_template: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-f".into(),
        plan.expression.as_str().into(),
        "--merge-output-format".into(),
        plan.merge_output_format.as_str().into(),
        "--newline".into(),
        "--progress-template".into(),
        PROGRESS_TEMPLATE.into(),
        "-o".into(),
        output_template.as_os_str().to_owned(),
    ];

    if plan.no_playlist {
        args.push("--no-playlist".into());
    }

    match &plan.post_processor {
        Some(PostProcessor::ExtractAudio { codec, quality }) => {
            args.push("--extract-audio".into());
            args.push("--audio-format".into());
            args.push(codec.into());
            args.push("--audio-quality".into());
            args.push(format!("{}K", quality).into());
        }
        Some(PostProcessor::ConvertVideo { format }) => {
            args.push("--recode-video".into());
            args.push(format.into());
        }
        None => {}
    }

    args.push("--".into());
    args.push(url.into());
    args
}

#[async_trait]
impl DownloadExecutor for YtDlpExecutor {
    async fn execute(
        &self,
        url: &str,
        plan: &DownloadPlan,
        output_template: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<()> {
        let args = build_args(url, plan, output_template);
        debug!("Running {:?} {:?}", self.ytdlp_path, args);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| YtLoaderError::Unexpected("yt-dlp stdout not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| YtLoaderError::Unexpected("yt-dlp stderr not captured".into()))?;

        let stderr_task = tokio::spawn(async move {
            let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
            let mut reader = BufReader::new(stderr);
            let mut buf = Vec::new();
            while let Ok(Some(line)) = next_line_lossy(&mut reader, &mut buf).await {
                debug!("yt-dlp: {}", line);
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
            Vec::from(tail).join("\n")
        });

        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        while let Some(line) = next_line_lossy(&mut reader, &mut buf).await? {
            match parse_progress_line(&line) {
                Some(event) => sink.emit(event),
                None => debug!("yt-dlp: {}", line),
            }
        }

        let status = child.wait().await?;
        let stderr_tail = stderr_task.await.unwrap_or_default();

        if status.success() {
            info!("yt-dlp finished downloading {}", url);
            Ok(())
        } else {
            let message = if stderr_tail.trim().is_empty() {
                format!("yt-dlp exited with {}", status)
            } else {
                stderr_tail.trim().to_string()
            };
            error!("yt-dlp download failed: {}", message);
            Err(YtLoaderError::DownloadError(message))
        }
    }
}
