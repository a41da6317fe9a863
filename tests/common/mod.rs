//! Fake collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use ytloader::downloader::{DownloadExecutor, DownloadService, ProgressEvent, ProgressSink};
use ytloader::extractor::{Extractor, Format, VideoInfo};
use ytloader::selection::DownloadPlan;
use ytloader::utils::{Result, YtLoaderError};

pub const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub fn format(id: &str, ext: &str, vcodec: &str, acodec: &str, height: Option<u32>) -> Format {
    Format {
        format_id: id.to_string(),
        ext: ext.to_string(),
        vcodec: Some(vcodec.to_string()),
        acodec: Some(acodec.to_string()),
        height,
        ..Default::default()
    }
}

pub fn sample_video() -> VideoInfo {
    VideoInfo {
        id: "dQw4w9WgXcQ".to_string(),
        title: "Sample Video".to_string(),
        url: URL.to_string(),
        duration: Some(212.0),
        uploader: Some("Uploader".to_string()),
        formats: vec![
            format("18", "mp4", "avc1.42001E", "mp4a.40.2", Some(360)),
            format("137", "mp4", "avc1.640028", "none", Some(1080)),
            format("140", "m4a", "none", "mp4a.40.2", None),
        ],
        ..Default::default()
    }
}

/// Extractor returning a fixed video, or failing when `fail` is set
pub struct FakeExtractor {
    pub info: VideoInfo,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn new(info: VideoInfo) -> Self {
        Self {
            info,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(VideoInfo::default())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn extract_info(&self, _url: &str) -> Result<VideoInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(YtLoaderError::ExtractionError("Video unavailable".to_string()))
        } else {
            Ok(self.info.clone())
        }
    }
}

/// How the fake executor finishes
#[derive(Debug, Clone)]
pub enum Outcome {
    Success,
    DownloadFailure(String),
    SpawnFailure,
}

/// Executor replaying canned progress events and recording its invocations
pub struct FakeExecutor {
    pub events: Vec<ProgressEvent>,
    pub outcome: Outcome,
    pub invocations: Mutex<Vec<(String, DownloadPlan, PathBuf)>>,
}

impl FakeExecutor {
    pub fn new(events: Vec<ProgressEvent>, outcome: Outcome) -> Self {
        Self {
            events,
            outcome,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

#[async_trait]
impl DownloadExecutor for FakeExecutor {
    async fn execute(
        &self,
        url: &str,
        plan: &DownloadPlan,
        output_template: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<()> {
        self.invocations.lock().unwrap().push((
            url.to_string(),
            plan.clone(),
            output_template.to_path_buf(),
        ));

        for event in &self.events {
            sink.emit(event.clone());
        }

        match &self.outcome {
            Outcome::Success => Ok(()),
            Outcome::DownloadFailure(msg) => Err(YtLoaderError::DownloadError(msg.clone())),
            Outcome::SpawnFailure => Err(YtLoaderError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "yt-dlp vanished",
            ))),
        }
    }
}

pub fn service(
    extractor: &Arc<FakeExtractor>,
    executor: &Arc<FakeExecutor>,
    output_dir: impl Into<PathBuf>,
) -> DownloadService {
    DownloadService::new(extractor.clone(), executor.clone(), output_dir)
}
