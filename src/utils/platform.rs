//! Platform-specific utilities for ytloader
//!
//! This module provides cross-platform abstractions for:
//! - Application directories (config)
//! - Default download location

use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Returns the configuration directory
/// - macOS: ~/Library/Application Support/ytloader
/// - Windows: %APPDATA%\ytloader
/// - Linux: ~/.config/ytloader
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytloader")
}

/// Path of the persisted settings file
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Returns the default download directory: `./downloads`, made absolute
pub fn default_download_dir() -> PathBuf {
    absolute(Path::new("downloads"))
}

/// Resolve a possibly relative path against the current directory.
///
/// Falls back to the path as given when the current directory is unavailable.
pub fn absolute(path: &Path) -> PathBuf {
    path.absolutize()
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Platform-specific executable name for yt-dlp
pub fn ytdlp_binary_name() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "yt-dlp.exe"
    }
    #[cfg(not(target_os = "windows"))]
    {
        "yt-dlp"
    }
}
