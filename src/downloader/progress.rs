//! Progress events relayed from yt-dlp

use serde::{Deserialize, Serialize};

/// Marker prefixed to every machine-readable progress line
pub const PROGRESS_MARKER: &str = "ytl-progress";

/// `--progress-template` making yt-dlp print one parseable line per update
pub const PROGRESS_TEMPLATE: &str = "download:ytl-progress|%(progress.status)s|%(progress._percent_str)s|%(progress._speed_str)s|%(progress.filename)s";

/// Placeholder yt-dlp prints for unavailable template fields
const NOT_AVAILABLE: &str = "NA";

/// Stage reported by a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    Downloading,
    Finished,
}

/// One progress update from the executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    /// Percent string as printed by yt-dlp, e.g. "42.3%"
    pub percent: Option<String>,
    /// Transfer rate as printed by yt-dlp, e.g. "1.20MiB/s"
    pub speed: Option<String>,
    pub filename: Option<String>,
}

impl ProgressEvent {
    pub fn downloading(percent: impl Into<String>, speed: impl Into<String>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            percent: Some(percent.into()),
            speed: Some(speed.into()),
            filename: None,
        }
    }

    pub fn finished(filename: impl Into<String>) -> Self {
        Self {
            status: ProgressStatus::Finished,
            percent: None,
            speed: None,
            filename: Some(filename.into()),
        }
    }

    /// Completion in 0.0..=1.0, when the percent string is numeric
    pub fn fraction(&self) -> Option<f32> {
        let percent = self.percent.as_deref()?.trim().trim_end_matches('%');
        percent
            .parse::<f32>()
            .ok()
            .map(|p| (p / 100.0).clamp(0.0, 1.0))
    }
}

/// Receiver for progress events.
///
/// Events arrive in the order yt-dlp prints them; throttling, if any, is up
/// to the sink.
pub trait ProgressSink: Send {
    fn emit(&mut self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent) + Send,
{
    fn emit(&mut self, event: ProgressEvent) {
        (*self)(event)
    }
}

/// Parse a line printed under [`PROGRESS_TEMPLATE`]; other output yields `None`.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.trim().strip_prefix(PROGRESS_MARKER)?.strip_prefix('|')?;
    let mut fields = rest.splitn(4, '|');

    let status = match fields.next()?.trim() {
        "downloading" => ProgressStatus::Downloading,
        "finished" => ProgressStatus::Finished,
        _ => return None,
    };

    let mut field = || {
        fields
            .next()
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
            .map(str::to_string)
    };
    let percent = field();
    let speed = field();
    let filename = field();

    Some(ProgressEvent {
        status,
        percent,
        speed,
        filename,
    })
}
