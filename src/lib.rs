//! ytloader library
//!
//! Format selection and download orchestration on top of yt-dlp, with a
//! command-line flow and an iced GUI as front ends.

pub mod backend;
pub mod cli;
pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod selection;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{DownloadPreview, DownloadResult, DownloadService, ProgressEvent};
pub use extractor::{Format, VideoInfo, YtDlpExtractor};
pub use selection::{Quality, QualityRequest};
pub use utils::{AppSettings, YtLoaderError};
