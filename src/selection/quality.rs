//! Quality requests and their translation into yt-dlp format selectors

use crate::utils::{Result, YtLoaderError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Height ceiling for `Quality::Best`, keeps 8K sources out of default downloads
pub const BEST_HEIGHT_CAP: u32 = 2160;

/// Container separate video and audio streams are merged into
pub const MERGE_OUTPUT_FORMAT: &str = "mp4";

/// Audio codec used for audio-only downloads without an override
pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";

/// Target audio bitrate (kbps) for audio extraction
pub const DEFAULT_AUDIO_QUALITY: &str = "192";

/// Heights offered as presets
pub const SUPPORTED_HEIGHTS: [u32; 6] = [2160, 1440, 1080, 720, 480, 360];

/// Containers a video download may be converted into
pub const VIDEO_FORMATS: [&str; 4] = ["mp4", "webm", "mkv", "avi"];

/// Codecs an audio download may be extracted to
pub const AUDIO_FORMATS: [&str; 5] = ["mp3", "m4a", "wav", "flac", "ogg"];

/// Values yt-dlp's `--audio-format` accepts
pub const EXTRACT_AUDIO_CODECS: [&str; 9] = [
    "best", "aac", "alac", "flac", "m4a", "mp3", "opus", "vorbis", "wav",
];

/// Preset tokens with their descriptions, in menu order
pub const QUALITY_PRESETS: [(&str, &str); 9] = [
    ("best", "Best quality available (up to 4K)"),
    ("4k", "4K Ultra HD (2160p)"),
    ("2160", "4K Ultra HD (2160p)"),
    ("1440", "2K Quad HD (1440p)"),
    ("1080", "Full HD (1080p)"),
    ("720", "HD Ready (720p)"),
    ("480", "Standard Definition (480p)"),
    ("360", "Low Quality (360p)"),
    ("worst", "Lowest quality available"),
];

/// Requested quality, decoded once from the user's token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Quality {
    #[default]
    Best,
    Worst,
    /// Upper bound on video height in pixels
    Height(u32),
    AudioOnly,
}

impl Quality {
    pub fn is_audio_only(self) -> bool {
        matches!(self, Quality::AudioOnly)
    }

    /// Human description for menus and previews
    pub fn description(self) -> String {
        match self {
            Quality::AudioOnly => "Audio only".to_string(),
            Quality::Height(h) if !SUPPORTED_HEIGHTS.contains(&h) => {
                format!("Custom (up to {}p)", h)
            }
            other => {
                let token = other.to_string();
                QUALITY_PRESETS
                    .iter()
                    .find(|(t, _)| *t == token)
                    .map(|(_, d)| d.to_string())
                    .unwrap_or(token)
            }
        }
    }
}

impl FromStr for Quality {
    type Err = YtLoaderError;

    fn from_str(token: &str) -> Result<Self> {
        let normalized = token.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "best" => return Ok(Quality::Best),
            "worst" => return Ok(Quality::Worst),
            "audio" | "audio-only" => return Ok(Quality::AudioOnly),
            "4k" => return Ok(Quality::Height(2160)),
            _ => {}
        }

        let digits = normalized.strip_suffix('p').unwrap_or(normalized.as_str());
        match digits.parse::<i64>() {
            Ok(n) if n <= 0 => Err(YtLoaderError::NonPositiveHeight(n)),
            Ok(n) => u32::try_from(n)
                .map(Quality::Height)
                .map_err(|_| YtLoaderError::InvalidQuality(token.to_string())),
            Err(_) => Err(YtLoaderError::InvalidQuality(token.to_string())),
        }
    }
}

impl TryFrom<String> for Quality {
    type Error = YtLoaderError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Quality> for String {
    fn from(quality: Quality) -> Self {
        quality.to_string()
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Best => f.write_str("best"),
            Quality::Worst => f.write_str("worst"),
            Quality::Height(h) => write!(f, "{}", h),
            Quality::AudioOnly => f.write_str("audio"),
        }
    }
}

/// A quality plus an optional output format override
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QualityRequest {
    pub quality: Quality,
    pub output_format: Option<String>,
}

impl QualityRequest {
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            output_format: None,
        }
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    pub fn is_audio_only(&self) -> bool {
        self.quality.is_audio_only()
    }
}

/// A yt-dlp `-f` selector string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionExpression(String);

impl SelectionExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `/`-separated fallback alternatives, most preferred first
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for SelectionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Work ffmpeg performs after the download
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostProcessor {
    /// Re-encode the merged video into another container
    ConvertVideo { format: String },
    /// Drop the video track and transcode the audio
    ExtractAudio { codec: String, quality: String },
}

/// Everything the download executor needs besides the URL and output template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DownloadPlan {
    pub expression: SelectionExpression,
    pub merge_output_format: String,
    pub post_processor: Option<PostProcessor>,
    pub no_playlist: bool,
}

impl DownloadPlan {
    pub fn is_audio_only(&self) -> bool {
        matches!(self.post_processor, Some(PostProcessor::ExtractAudio { .. }))
    }

    /// Extension of the file left on disk once post-processing is done;
    /// `None` when extraction keeps whatever codec the source has.
    pub fn final_extension(&self) -> Option<&str> {
        match &self.post_processor {
            Some(PostProcessor::ExtractAudio { codec, .. }) => match codec.as_str() {
                "best" => None,
                "vorbis" => Some("ogg"),
                "alac" => Some("m4a"),
                other => Some(other),
            },
            Some(PostProcessor::ConvertVideo { format }) => Some(format.as_str()),
            None => Some(self.merge_output_format.as_str()),
        }
    }
}

/// Translate a request into a download plan.
///
/// Fails only for a zero height; no I/O happens here.
pub fn resolve(request: &QualityRequest) -> Result<DownloadPlan> {
    let expression = match request.quality {
        Quality::Best => format!(
            "bestvideo[height<={cap}]+bestaudio/best[height<={cap}]/bestvideo+bestaudio/best",
            cap = BEST_HEIGHT_CAP
        ),
        Quality::Worst => "worst".to_string(),
        Quality::Height(0) => return Err(YtLoaderError::NonPositiveHeight(0)),
        Quality::Height(h) => format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]", h = h),
        Quality::AudioOnly => "bestaudio/best".to_string(),
    };

    let post_processor = match (&request.quality, &request.output_format) {
        (Quality::AudioOnly, format) => Some(PostProcessor::ExtractAudio {
            codec: audio_codec_for(format.as_deref().unwrap_or(DEFAULT_AUDIO_FORMAT)).to_string(),
            quality: DEFAULT_AUDIO_QUALITY.to_string(),
        }),
        (_, Some(format)) => Some(PostProcessor::ConvertVideo {
            format: format.clone(),
        }),
        (_, None) => None,
    };

    Ok(DownloadPlan {
        expression: SelectionExpression(expression),
        merge_output_format: MERGE_OUTPUT_FORMAT.to_string(),
        post_processor,
        no_playlist: true,
    })
}

/// `--audio-format` value for a requested audio container or codec.
///
/// Containers map to the codec they carry (webm to opus, ogg to vorbis).
/// Anything yt-dlp cannot extract to keeps the source codec.
pub fn audio_codec_for(format: &str) -> &'static str {
    match format.trim().to_ascii_lowercase().as_str() {
        "webm" | "weba" | "opus" => "opus",
        "ogg" | "oga" | "vorbis" => "vorbis",
        "m4a" | "mp4" => "m4a",
        "aac" => "aac",
        "alac" => "alac",
        "flac" => "flac",
        "mp3" => "mp3",
        "wav" => "wav",
        _ => "best",
    }
}

/// Check an output format override against the supported containers/codecs
pub fn validate_output_format(format: &str) -> Result<String> {
    let normalized = format.trim().to_ascii_lowercase();
    if VIDEO_FORMATS.contains(&normalized.as_str()) || AUDIO_FORMATS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(YtLoaderError::InvalidOutputFormat(format.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("best".parse::<Quality>().unwrap(), Quality::Best);
        assert_eq!("WORST".parse::<Quality>().unwrap(), Quality::Worst);
        assert_eq!("4k".parse::<Quality>().unwrap(), Quality::Height(2160));
        assert_eq!("1080".parse::<Quality>().unwrap(), Quality::Height(1080));
        assert_eq!("720p".parse::<Quality>().unwrap(), Quality::Height(720));
        assert_eq!("audio".parse::<Quality>().unwrap(), Quality::AudioOnly);
        assert_eq!("999999".parse::<Quality>().unwrap(), Quality::Height(999_999));
    }

    #[test]
    fn test_reject_bad_tokens() {
        assert!(matches!(
            "ultra".parse::<Quality>(),
            Err(YtLoaderError::InvalidQuality(_))
        ));
        assert!(matches!(
            "0".parse::<Quality>(),
            Err(YtLoaderError::NonPositiveHeight(0))
        ));
        assert!(matches!(
            "-480".parse::<Quality>(),
            Err(YtLoaderError::NonPositiveHeight(-480))
        ));
        assert!(matches!(
            "99999999999".parse::<Quality>(),
            Err(YtLoaderError::InvalidQuality(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for quality in [Quality::Best, Quality::Worst, Quality::Height(1440), Quality::AudioOnly] {
            assert_eq!(quality.to_string().parse::<Quality>().unwrap(), quality);
        }
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Quality::Height(1080).description(), "Full HD (1080p)");
        assert_eq!(Quality::Best.description(), "Best quality available (up to 4K)");
        assert_eq!(Quality::Height(900).description(), "Custom (up to 900p)");
    }

    #[test]
    fn test_best_expression() {
        let plan = resolve(&QualityRequest::new(Quality::Best)).unwrap();
        let alternatives: Vec<_> = plan.expression.alternatives().collect();

        assert!(alternatives[0].contains("[height<=2160]"));
        assert_eq!(alternatives.last(), Some(&"best"));
        assert_eq!(
            plan.expression.as_str(),
            "bestvideo[height<=2160]+bestaudio/best[height<=2160]/bestvideo+bestaudio/best"
        );
        assert_eq!(plan.post_processor, None);
        assert_eq!(plan.merge_output_format, "mp4");
        assert!(plan.no_playlist);
    }

    #[test]
    fn test_worst_expression() {
        let plan = resolve(&QualityRequest::new(Quality::Worst)).unwrap();
        assert_eq!(plan.expression.as_str(), "worst");
    }

    #[test]
    fn test_height_uses_upper_bound() {
        let plan = resolve(&QualityRequest::new(Quality::Height(720))).unwrap();
        let expr = plan.expression.as_str();

        assert!(expr.contains("height<=720"));
        assert!(!expr.contains("height=720"));
        assert_eq!(expr, "bestvideo[height<=720]+bestaudio/best[height<=720]");
    }

    #[test]
    fn test_custom_height_passes_through() {
        let plan = resolve(&QualityRequest::new(Quality::Height(999_999))).unwrap();
        assert!(plan.expression.as_str().contains("height<=999999"));
    }

    #[test]
    fn test_zero_height_is_rejected() {
        assert!(matches!(
            resolve(&QualityRequest::new(Quality::Height(0))),
            Err(YtLoaderError::NonPositiveHeight(0))
        ));
    }

    #[test]
    fn test_audio_only_defaults() {
        let plan = resolve(&QualityRequest::new(Quality::AudioOnly)).unwrap();

        assert_eq!(plan.expression.as_str(), "bestaudio/best");
        assert_eq!(
            plan.post_processor,
            Some(PostProcessor::ExtractAudio {
                codec: "mp3".to_string(),
                quality: "192".to_string(),
            })
        );
        assert!(plan.is_audio_only());
        assert_eq!(plan.final_extension(), Some("mp3"));
    }

    #[test]
    fn test_audio_override_changes_codec() {
        let request = QualityRequest::new(Quality::AudioOnly).with_output_format("flac");
        let plan = resolve(&request).unwrap();

        assert_eq!(
            plan.post_processor,
            Some(PostProcessor::ExtractAudio {
                codec: "flac".to_string(),
                quality: "192".to_string(),
            })
        );
    }

    #[test]
    fn test_audio_containers_map_to_extractable_codecs() {
        assert_eq!(audio_codec_for("webm"), "opus");
        assert_eq!(audio_codec_for("ogg"), "vorbis");
        assert_eq!(audio_codec_for("M4A"), "m4a");
        assert_eq!(audio_codec_for("3gp"), "best");
        for format in AUDIO_FORMATS {
            assert!(EXTRACT_AUDIO_CODECS.contains(&audio_codec_for(format)));
        }
    }

    #[test]
    fn test_audio_container_override_extracts_codec() {
        let plan = resolve(&QualityRequest::new(Quality::AudioOnly).with_output_format("webm")).unwrap();
        assert_eq!(
            plan.post_processor,
            Some(PostProcessor::ExtractAudio {
                codec: "opus".to_string(),
                quality: "192".to_string(),
            })
        );
        assert_eq!(plan.final_extension(), Some("opus"));

        let plan = resolve(&QualityRequest::new(Quality::AudioOnly).with_output_format("ogg")).unwrap();
        assert_eq!(plan.final_extension(), Some("ogg"));
    }

    #[test]
    fn test_video_override_converts_container() {
        let request = QualityRequest::new(Quality::Height(1080)).with_output_format("mkv");
        let plan = resolve(&request).unwrap();

        assert_eq!(
            plan.post_processor,
            Some(PostProcessor::ConvertVideo {
                format: "mkv".to_string()
            })
        );
        assert_eq!(plan.final_extension(), Some("mkv"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let request = QualityRequest::new(Quality::Height(480)).with_output_format("webm");
        assert_eq!(resolve(&request).unwrap(), resolve(&request).unwrap());
    }

    #[test]
    fn test_validate_output_format() {
        assert_eq!(validate_output_format("MP4").unwrap(), "mp4");
        assert_eq!(validate_output_format("flac").unwrap(), "flac");
        assert!(matches!(
            validate_output_format("exe"),
            Err(YtLoaderError::InvalidOutputFormat(_))
        ));
    }
}
