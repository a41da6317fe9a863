//! Error handling for ytloader

use thiserror::Error;

/// Main error type for ytloader
#[derive(Debug, Error)]
pub enum YtLoaderError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported quality '{0}' (expected best, worst, audio, 4k or a height such as 1080)")]
    InvalidQuality(String),

    #[error("Quality height must be positive, got {0}")]
    NonPositiveHeight(i64),

    #[error("Unsupported output format '{0}'")]
    InvalidOutputFormat(String),

    #[error("Please specify an output directory")]
    EmptyOutputDir,

    #[error("Error getting video info: {0}")]
    ExtractionError(String),

    #[error("Download Error: {0}")]
    DownloadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl YtLoaderError {
    /// Usage errors are rejected before any external tool is invoked.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            YtLoaderError::InvalidUrl(_)
                | YtLoaderError::InvalidQuality(_)
                | YtLoaderError::NonPositiveHeight(_)
                | YtLoaderError::InvalidOutputFormat(_)
                | YtLoaderError::EmptyOutputDir
        )
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, YtLoaderError>;
