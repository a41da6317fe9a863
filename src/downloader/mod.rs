//! Download orchestration module

pub mod executor;
pub mod progress;
pub mod service;

// Re-export for convenience
pub use executor::{build_args, DownloadExecutor, YtDlpExecutor};
pub use progress::{parse_progress_line, ProgressEvent, ProgressSink, ProgressStatus};
pub use service::{
    DownloadPreview, DownloadResult, DownloadService, OutputPolicy, DEFAULT_FILENAME_TEMPLATE,
};
