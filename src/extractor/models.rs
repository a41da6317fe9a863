//! Data structures for video information

use serde::{Deserialize, Serialize};

/// Codec value yt-dlp reports for a missing track
pub const NO_CODEC: &str = "none";

/// Video information structure, as reported by `yt-dlp --dump-json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default = "not_available")]
    pub title: String,
    #[serde(rename = "webpage_url", default)]
    pub url: String,
    #[serde(default)]
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
    pub uploader: Option<String>,
    pub upload_date: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
    pub description: Option<String>,
    pub view_count: Option<u64>,
    pub extractor: Option<String>,
}

impl VideoInfo {
    /// Uploader name, or "N/A" when the site does not report one
    pub fn uploader_or_na(&self) -> &str {
        self.uploader.as_deref().unwrap_or("N/A")
    }

    /// Whole seconds of runtime; 0 when unknown
    pub fn duration_secs(&self) -> u64 {
        self.duration.map(|d| d.max(0.0) as u64).unwrap_or(0)
    }
}

/// One stream descriptor reported by the extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    #[serde(default = "unknown_ext")]
    pub ext: String,
    #[serde(default)]
    pub url: Option<String>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub format_note: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    pub filesize_approx: Option<u64>,
    pub tbr: Option<f32>, // Total bitrate
    pub abr: Option<f32>, // Audio bitrate
}

impl Format {
    /// Whether the descriptor carries a video track
    pub fn has_video(&self) -> bool {
        codec_present(self.vcodec.as_deref())
    }

    /// Whether the descriptor carries an audio track
    pub fn has_audio(&self) -> bool {
        codec_present(self.acodec.as_deref())
    }

    /// Video codec, "none" when absent
    pub fn vcodec_or_none(&self) -> &str {
        self.vcodec.as_deref().unwrap_or(NO_CODEC)
    }

    /// Audio codec, "none" when absent
    pub fn acodec_or_none(&self) -> &str {
        self.acodec.as_deref().unwrap_or(NO_CODEC)
    }
}

fn codec_present(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if !c.is_empty() && c != NO_CODEC)
}

fn unknown_ext() -> String {
    "unknown".to_string()
}

fn not_available() -> String {
    "N/A".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ytdlp_json() {
        let json = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "Sample",
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "duration": 212.0,
            "uploader": "Channel",
            "upload_date": "20091025",
            "view_count": 1500000000,
            "formats": [
                {"format_id": "251", "ext": "webm", "vcodec": "none", "acodec": "opus", "abr": 130.5},
                {"format_id": "18", "ext": "mp4", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "height": 360, "width": 640, "fps": 25, "filesize": 8388608},
                {"format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none"}
            ]
        }"#;

        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.title, "Sample");
        assert_eq!(info.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(info.duration_secs(), 212);
        assert_eq!(info.formats.len(), 3);
        assert!(info.formats[1].has_video() && info.formats[1].has_audio());
        assert!(!info.formats[0].has_video());
        assert!(!info.formats[2].has_video() && !info.formats[2].has_audio());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let info: VideoInfo = serde_json::from_str(r#"{"formats": [{"format_id": "x"}]}"#).unwrap();
        assert_eq!(info.title, "N/A");
        assert_eq!(info.uploader_or_na(), "N/A");
        assert_eq!(info.duration_secs(), 0);
        assert_eq!(info.formats[0].ext, "unknown");
        assert_eq!(info.formats[0].vcodec_or_none(), "none");
    }
}
