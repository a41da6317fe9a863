//! Application configuration

use crate::selection::Quality;
use crate::utils::error::{Result, YtLoaderError};
use crate::utils::platform;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Download location
    pub download_location: PathBuf,

    /// Preferred video quality
    pub quality: Quality,

    /// Codec used when extracting audio without an explicit format
    pub audio_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: platform::default_download_dir(),
            quality: Quality::Best,
            audio_format: crate::selection::DEFAULT_AUDIO_FORMAT.to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from the platform config directory.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        Self::load_from(&platform::settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        let loaded = fs::read_to_string(path)
            .map_err(YtLoaderError::from)
            .and_then(|json| serde_json::from_str::<AppSettings>(&json).map_err(YtLoaderError::from));

        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring unreadable settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Persist settings to the platform config directory
    pub fn save(&self) -> Result<PathBuf> {
        let path = platform::settings_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("Settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert_eq!(config.quality, Quality::Best);
        assert_eq!(config.audio_format, "mp3");
        assert!(config.download_location.is_absolute());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings {
            download_location: dir.path().join("videos"),
            quality: Quality::Height(720),
            audio_format: "flac".to_string(),
        };
        settings.save_to(&path).unwrap();

        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "quality": "1080" }"#).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded.quality, Quality::Height(1080));
        assert_eq!(loaded.audio_format, "mp3");
    }
}
