//! Download orchestration
//!
//! `DownloadService` ties the pieces together: it validates the request,
//! resolves the quality into a plan, consults the extractor for metadata and
//! hands the plan to the executor exactly once. Failures are reported, never
//! retried.

use crate::downloader::executor::{DownloadExecutor, YtDlpExecutor};
use crate::downloader::progress::ProgressSink;
use crate::extractor::{validate_url, Extractor, VideoInfo, YtDlpExtractor};
use crate::selection::{
    build_options, normalize, resolve, DownloadPlan, NormalizedFormat, Quality, QualityRequest,
    SelectionOption,
};
use crate::utils::{absolute, Result, YtLoaderError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// yt-dlp output template for downloaded files
pub const DEFAULT_FILENAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Where and under which name downloads are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPolicy {
    pub output_dir: PathBuf,
    pub filename_template: String,
}

impl OutputPolicy {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
        }
    }

    /// Full output template handed to the executor
    pub fn template_path(&self) -> PathBuf {
        self.output_dir.join(&self.filename_template)
    }
}

/// Outcome of a finished download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub title: String,
    pub uploader: String,
    /// Seconds; 0 when unknown
    pub duration: u64,
    /// Absolute output directory
    pub output_dir: PathBuf,
    pub quality: Quality,
    pub audio_only: bool,
    pub message: String,
}

/// What a download would do, without doing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadPreview {
    pub title: String,
    pub uploader: String,
    pub duration: u64,
    pub output_dir: PathBuf,
    pub quality: Quality,
    pub audio_only: bool,
    pub format_string: String,
    pub estimated_filename: String,
}

/// Front door for every presentation layer
#[derive(Clone)]
pub struct DownloadService {
    extractor: Arc<dyn Extractor>,
    executor: Arc<dyn DownloadExecutor>,
    output_dir: PathBuf,
}

impl DownloadService {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        executor: Arc<dyn DownloadExecutor>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            executor,
            output_dir: output_dir.into(),
        }
    }

    /// Service wired to the locally installed yt-dlp
    pub fn with_ytdlp(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let extractor = YtDlpExtractor::new()?;
        let executor = YtDlpExecutor::with_path(extractor.ytdlp_path());
        Ok(Self::new(Arc::new(extractor), Arc::new(executor), output_dir))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = output_dir.into();
    }

    /// Video metadata including the raw format list
    pub async fn video_info(&self, url: &str) -> Result<VideoInfo> {
        validate_url(url)?;
        let url = url.trim();

        self.extractor
            .extract_info(url)
            .await
            .map_err(|e| match e {
                YtLoaderError::ExtractionError(_) => e,
                other => YtLoaderError::ExtractionError(other.to_string()),
            })
    }

    /// Ranked, classified formats
    pub async fn available_formats(&self, url: &str) -> Result<Vec<NormalizedFormat>> {
        let info = self.video_info(url).await?;
        Ok(normalize(info.formats))
    }

    /// Menu entries for interactive selection
    pub async fn selection_options(&self, url: &str) -> Result<Vec<SelectionOption>> {
        let catalog = self.available_formats(url).await?;
        Ok(build_options(&catalog))
    }

    /// Describe the download a request would start
    pub async fn preview(&self, url: &str, request: &QualityRequest) -> Result<DownloadPreview> {
        validate_url(url)?;
        let plan = resolve(request)?;
        let info = self.video_info(url).await?;

        Ok(DownloadPreview {
            estimated_filename: format!(
                "{}.{}",
                info.title,
                if plan.is_audio_only() { "mp3" } else { "mp4" }
            ),
            title: info.title.clone(),
            uploader: info.uploader_or_na().to_string(),
            duration: info.duration_secs(),
            output_dir: absolute(&self.output_dir),
            quality: request.quality,
            audio_only: request.is_audio_only(),
            format_string: plan.expression.to_string(),
        })
    }

    /// Validate, resolve and download `url`, relaying progress to `sink`.
    ///
    /// Usage errors are raised before the extractor or executor is touched.
    pub async fn download(
        &self,
        url: &str,
        request: &QualityRequest,
        sink: &mut dyn ProgressSink,
    ) -> Result<DownloadResult> {
        validate_url(url)?;
        let plan = resolve(request)?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(YtLoaderError::EmptyOutputDir);
        }
        let policy = OutputPolicy::new(&self.output_dir);

        tokio::fs::create_dir_all(&policy.output_dir).await?;

        let info = self.video_info(url).await?;
        info!(
            "Downloading '{}' with selector {}",
            info.title, plan.expression
        );

        self.execute(url, &plan, &policy, sink).await?;

        Ok(DownloadResult {
            title: info.title.clone(),
            uploader: info.uploader_or_na().to_string(),
            duration: info.duration_secs(),
            output_dir: absolute(&policy.output_dir),
            quality: request.quality,
            audio_only: request.is_audio_only(),
            message: "Download completed successfully!".to_string(),
        })
    }

    /// Run the executor once for an already resolved plan.
    ///
    /// Executor failures keep their message; anything else becomes
    /// `YtLoaderError::Unexpected`. Partial files are left where they are.
    pub async fn execute(
        &self,
        url: &str,
        plan: &DownloadPlan,
        policy: &OutputPolicy,
        sink: &mut dyn ProgressSink,
    ) -> Result<()> {
        let template = policy.template_path();
        debug!("Output template: {:?}", template);

        self.executor
            .execute(url.trim(), plan, &template, sink)
            .await
            .map_err(|e| match e {
                YtLoaderError::DownloadError(msg) => {
                    warn!("Download failed: {}", msg);
                    YtLoaderError::DownloadError(msg)
                }
                other => {
                    warn!("Unexpected failure during download: {}", other);
                    YtLoaderError::Unexpected(other.to_string())
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_joins_output_dir() {
        let policy = OutputPolicy::new("/tmp/videos");
        assert_eq!(
            policy.template_path(),
            PathBuf::from("/tmp/videos/%(title)s.%(ext)s")
        );
    }
}
