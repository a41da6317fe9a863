//! yt-dlp wrapper for video extraction
//!
//! This module handles video information extraction using yt-dlp.
//! It supports an explicitly configured binary, one shipped next to the
//! executable (including macOS .app bundles) and system-installed yt-dlp.

use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::platform::ytdlp_binary_name;
use crate::utils::{Result, YtLoaderError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Environment variable that pins the yt-dlp binary
pub const YTDLP_ENV: &str = "YTLOADER_YTDLP";

/// Metadata extractor backed by the yt-dlp binary
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    pub fn new() -> Result<Self> {
        let ytdlp_path = match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                path
            }
            None => {
                error!("yt-dlp not found anywhere!");
                return Err(YtLoaderError::YtDlpNotFound);
            }
        };

        Ok(Self { ytdlp_path })
    }

    /// Use a specific yt-dlp binary
    pub fn with_path(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    /// Extract video information without downloading
    /// Uses: yt-dlp --dump-json --no-download
    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        debug!("Extracting video info for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg("--no-playlist")
            .arg("--")
            .arg(url)
            .output()
            .await
            .map_err(|e| YtLoaderError::ExtractionError(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg);
            return Err(YtLoaderError::ExtractionError(error_msg.trim().to_string()));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let video_info: VideoInfo = serde_json::from_str(&json_str)
            .map_err(|e| YtLoaderError::ExtractionError(format!("malformed yt-dlp output: {}", e)))?;

        debug!(
            "Extracted '{}' with {} formats",
            video_info.title,
            video_info.formats.len()
        );
        Ok(video_info)
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. `YTLOADER_YTDLP` environment variable
/// 2. Bundled (next to the executable or inside a .app bundle)
/// 3. System PATH
/// 4. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(configured) = std::env::var_os(YTDLP_ENV).map(PathBuf::from) {
        if configured.is_file() {
            info!("✓ Using yt-dlp from {}: {:?}", YTDLP_ENV, configured);
            return Some(configured);
        }
        warn!("{} points to a missing file: {:?}", YTDLP_ENV, configured);
    }

    if let Some(bundled) = find_bundled_ytdlp() {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Ok(system) = which::which(ytdlp_binary_name()) {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

/// Find yt-dlp shipped alongside the executable
fn find_bundled_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    // Structure: App.app/Contents/MacOS/ytloader
    //                           /Resources/bin/yt-dlp
    if exe_dir.ends_with("MacOS") {
        let contents_dir = exe_dir.parent()?;
        let ytdlp_path = contents_dir.join("Resources").join("bin").join("yt-dlp");
        if is_executable(&ytdlp_path) {
            return Some(ytdlp_path);
        }
    }

    let adjacent = exe_dir.join(ytdlp_binary_name());
    if is_executable(&adjacent) {
        return Some(adjacent);
    }

    None
}

/// Find yt-dlp in common installation paths
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // Python.org installation
        "/Library/Frameworks/Python.framework/Versions/Current/bin/yt-dlp",
    ];

    let user_local = dirs::home_dir().map(|home| home.join(".local").join("bin").join("yt-dlp"));

    common_paths
        .iter()
        .map(PathBuf::from)
        .chain(user_local)
        .find(|path| is_executable(path))
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let pinned = dir.path().join(ytdlp_binary_name());
        std::fs::write(&pinned, "").unwrap();

        std::env::set_var(YTDLP_ENV, &pinned);
        let found = find_ytdlp();
        std::env::remove_var(YTDLP_ENV);

        assert_eq!(found, Some(pinned));
    }

    #[test]
    fn test_missing_file_is_not_executable() {
        assert!(!is_executable(Path::new("/definitely/not/here/yt-dlp")));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable() {
        let path = PathBuf::from("/bin/sh");
        if path.exists() {
            assert!(is_executable(&path));
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_url_follows_option_terminator() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("yt-dlp");
        let argv_log = dir.path().join("argv.log");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > '{}'\n\
                 echo '{{\"id\":\"abc\",\"title\":\"Sample\",\"formats\":[]}}'\n",
                argv_log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let extractor = YtDlpExtractor::with_path(&script);
        let info = extractor
            .extract_info("--batch-file=/tmp/youtube.com")
            .await
            .unwrap();
        assert_eq!(info.title, "Sample");

        let argv = std::fs::read_to_string(&argv_log).unwrap();
        let argv: Vec<&str> = argv.lines().collect();
        assert_eq!(
            argv,
            vec![
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--no-playlist",
                "--",
                "--batch-file=/tmp/youtube.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_reports_extraction_error() {
        let extractor = YtDlpExtractor::with_path("/definitely/not/here/yt-dlp");
        let err = extractor
            .extract_info("https://www.youtube.com/watch?v=abc")
            .await
            .unwrap_err();
        assert!(matches!(err, YtLoaderError::ExtractionError(_)));
    }
}
