use crate::downloader::{DownloadResult, ProgressEvent};
use crate::extractor::VideoInfo;
use crate::selection::{NormalizedFormat, QualityRequest};
use std::path::PathBuf;

/// Commands sent from GUI to Backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    FetchInfo {
        url: String,
    },
    LoadFormats {
        url: String,
    },
    StartDownload {
        url: String,
        request: QualityRequest,
        output_dir: PathBuf,
    },
    // System
    Shutdown,
}

/// Events sent from Backend to GUI
#[derive(Debug, Clone)]
pub enum BackendEvent {
    InfoLoaded(Result<VideoInfo, String>),
    FormatsLoaded(Result<Vec<NormalizedFormat>, String>),

    // Download life-cycle
    Progress(ProgressEvent),
    DownloadFinished(Result<DownloadResult, String>),
}
