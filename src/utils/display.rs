//! Human-readable renderings shared by the CLI and the GUI

use chrono::NaiveDate;

/// Characters of the description shown before it is cut off
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// `m:ss`, minutes unbounded
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Thousands separated with commas
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// yt-dlp's `YYYYMMDD` as `YYYY-MM-DD`; anything unparseable is shown as is
pub fn format_upload_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// First 200 characters followed by `...`
pub fn truncate_description(description: &str) -> String {
    let preview: String = description
        .chars()
        .take(DESCRIPTION_PREVIEW_CHARS)
        .collect();
    format!("{}...", preview)
}
