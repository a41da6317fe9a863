//! Utility modules for error handling, configuration and display helpers

pub mod config;
pub mod display;
pub mod error;
pub mod platform;

// Re-export for convenience
pub use config::AppSettings;
pub use error::{Result, YtLoaderError};
pub use platform::{absolute, config_dir, default_download_dir};
