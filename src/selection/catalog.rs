//! Normalization and ranking of the raw format catalog

use crate::extractor::Format;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// What a stream carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    VideoWithAudio,
    VideoOnly,
    AudioOnly,
}

impl StreamKind {
    /// Classify a descriptor; `None` when it carries neither track.
    pub fn classify(format: &Format) -> Option<Self> {
        match (format.has_video(), format.has_audio()) {
            (true, true) => Some(StreamKind::VideoWithAudio),
            (true, false) => Some(StreamKind::VideoOnly),
            (false, true) => Some(StreamKind::AudioOnly),
            (false, false) => None,
        }
    }

    /// Sort priority, lower ranks first
    pub fn priority(self) -> u8 {
        match self {
            StreamKind::VideoWithAudio => 0,
            StreamKind::VideoOnly => 1,
            StreamKind::AudioOnly => 2,
        }
    }

    pub fn is_video(self) -> bool {
        !matches!(self, StreamKind::AudioOnly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::VideoWithAudio => "Video+Audio",
            StreamKind::VideoOnly => "Video Only",
            StreamKind::AudioOnly => "Audio Only",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified descriptor with its display labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFormat {
    pub format: Format,
    pub kind: StreamKind,
    /// "1080p 30fps", "128kbps" or "Unknown"
    pub quality: String,
    /// Audio codec for audio-only streams, video codec otherwise
    pub codec: String,
    /// Whole megabytes; 0 means the size is unknown
    pub size_mb: u64,
}

impl NormalizedFormat {
    /// Derive labels for a descriptor, dropping it when it has no tracks
    pub fn from_format(format: Format) -> Option<Self> {
        let kind = StreamKind::classify(&format)?;

        let quality = match (format.height, format.fps, format.abr) {
            (Some(height), Some(fps), _) => format!("{}p {}fps", height, fps),
            (Some(height), None, _) => format!("{}p", height),
            (None, _, Some(abr)) => format!("{}kbps", abr),
            (None, _, None) => "Unknown".to_string(),
        };

        let codec = match kind {
            StreamKind::AudioOnly => format.acodec_or_none().to_string(),
            _ => format.vcodec_or_none().to_string(),
        };

        let size_mb = format.filesize.map(|bytes| bytes / BYTES_PER_MB).unwrap_or(0);

        Some(Self {
            format,
            kind,
            quality,
            codec,
            size_mb,
        })
    }

    pub fn id(&self) -> &str {
        &self.format.format_id
    }

    pub fn ext(&self) -> &str {
        &self.format.ext
    }

    pub fn height(&self) -> Option<u32> {
        self.format.height
    }

    /// (kind priority ascending, height descending); missing height counts as 0
    pub fn rank_key(&self) -> (u8, Reverse<u32>) {
        (self.kind.priority(), Reverse(self.height().unwrap_or(0)))
    }
}

/// Classify, label and rank the extractor's format list
pub fn normalize(raw: impl IntoIterator<Item = Format>) -> Vec<NormalizedFormat> {
    let mut formats: Vec<NormalizedFormat> = raw
        .into_iter()
        .filter_map(NormalizedFormat::from_format)
        .collect();
    sort_catalog(&mut formats);
    formats
}

/// Stable rank ordering; ties keep the extractor's order
pub fn sort_catalog(formats: &mut [NormalizedFormat]) {
    formats.sort_by_key(NormalizedFormat::rank_key);
}
