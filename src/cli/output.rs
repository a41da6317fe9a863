//! Terminal rendering for the command-line flow

use crate::downloader::{DownloadPreview, ProgressEvent, ProgressSink, ProgressStatus};
use crate::extractor::VideoInfo;
use crate::selection::{would_select, NormalizedFormat, Quality, SelectionOption, StreamKind};
use crate::utils::display::{
    format_count, format_duration, format_upload_date, truncate_description,
};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Video formats shown by `--list-formats`
pub const LISTED_VIDEO_FORMATS: usize = 15;
/// Audio formats shown by `--list-formats`
pub const LISTED_AUDIO_FORMATS: usize = 5;

const SELECTED_MARKER: &str = " ← SELECTED";

pub fn banner() -> String {
    format!(
        "{}\n{}",
        "🎥 YouTube Video Downloader (CLI)".magenta(),
        "=".repeat(30).magenta()
    )
}

fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{} {}\n", format!("{}:", label).green(), value)
}

/// `--info` output
pub fn format_info(info: &VideoInfo) -> String {
    let mut out = format!("{}\n", "Video Information:".cyan());
    out.push_str(&field("Title", &info.title));
    out.push_str(&field("Uploader", info.uploader_or_na()));
    out.push_str(&field("Duration", format_duration(info.duration_secs())));
    out.push_str(&field(
        "View Count",
        format_count(info.view_count.unwrap_or(0)),
    ));
    out.push_str(&field(
        "Upload Date",
        info.upload_date
            .as_deref()
            .map(format_upload_date)
            .unwrap_or_else(|| "N/A".to_string()),
    ));
    out.push_str(&field(
        "Description",
        truncate_description(info.description.as_deref().unwrap_or("")),
    ));
    out
}

fn size_suffix(format: &NormalizedFormat) -> String {
    if format.size_mb > 0 {
        format!(" ({}MB)", format.size_mb)
    } else {
        String::new()
    }
}

fn highlight(line: String, selected: bool) -> String {
    if selected {
        format!("{}{}", line, SELECTED_MARKER).bright_green().to_string()
    } else {
        line
    }
}

/// `--list-formats` output, marking what the current settings would download
pub fn format_listing(
    title: &str,
    catalog: &[NormalizedFormat],
    quality: Quality,
    audio_only: bool,
) -> String {
    let mut out = format!(
        "{}\n{}\n",
        format!("Available formats for: {}", title).cyan(),
        "=".repeat(50).cyan()
    );

    if audio_only {
        out.push_str(&format!("{}\n\n", "Mode: Audio Only".yellow()));
    } else {
        out.push_str(&format!(
            "{}\n\n",
            format!("Selected Quality: {}", quality).yellow()
        ));
    }

    let video: Vec<&NormalizedFormat> = catalog.iter().filter(|f| f.kind.is_video()).collect();
    let audio: Vec<&NormalizedFormat> = catalog
        .iter()
        .filter(|f| f.kind == StreamKind::AudioOnly)
        .collect();

    if !audio_only && !video.is_empty() {
        out.push_str(&format!("{}\n", "VIDEO FORMATS:".green()));
        for f in video.iter().take(LISTED_VIDEO_FORMATS) {
            let height = f
                .height()
                .map(|h| format!("{}p", h))
                .unwrap_or_else(|| "unknown".to_string());
            let fps = f
                .format
                .fps
                .map(|fps| format!(" {}fps", fps))
                .unwrap_or_default();
            let line = format!(
                "  {}: {} {} {}{} [{}]{}",
                f.id(),
                height,
                f.ext(),
                f.codec,
                fps,
                f.kind,
                size_suffix(f)
            );
            out.push_str(&highlight(line, would_select(f, quality)));
            out.push('\n');
        }
    }

    if !audio.is_empty() {
        out.push_str(&format!("\n{}\n", "AUDIO FORMATS:".green()));
        for (index, f) in audio.iter().take(LISTED_AUDIO_FORMATS).enumerate() {
            let abr = f
                .format
                .abr
                .map(|abr| format!(" {}kbps", abr))
                .unwrap_or_default();
            let line = format!(
                "  {}: {} {}{}{}",
                f.id(),
                f.ext(),
                f.codec,
                abr,
                size_suffix(f)
            );
            out.push_str(&highlight(line, audio_only && index == 0));
            out.push('\n');
        }
    }

    out
}

/// Header and numbered entries of the interactive menu
pub fn format_menu(info: &VideoInfo, options: &[SelectionOption], cancel: usize) -> String {
    let mut out = format!(
        "{}\n{}\n{}\n{}\n",
        format!("Video: {}", info.title).cyan(),
        format!("Uploader: {}", info.uploader_or_na()).cyan(),
        format!("Duration: {}", format_duration(info.duration_secs())).cyan(),
        "=".repeat(60).cyan()
    );

    out.push_str(&format!("{}\n", "📹 VIDEO OPTIONS:".green()));
    for opt in options.iter().filter(|o| !o.is_audio()) {
        out.push_str(&format!("  {} {}\n", format!("{:2}.", opt.ordinal).yellow(), opt.label));
    }

    out.push_str(&format!("\n{}\n", "🎵 AUDIO OPTIONS:".green()));
    for opt in options.iter().filter(|o| o.is_audio()) {
        out.push_str(&format!("  {} {}\n", format!("{:2}.", opt.ordinal).yellow(), opt.label));
    }

    out.push_str(&format!("\n{} Cancel download\n", format!("{:2}.", cancel).yellow()));
    out
}

/// Summary shown before asking for confirmation
pub fn format_preview(preview: &DownloadPreview) -> String {
    let mut out = format!("{}\n", "Download Preview:".cyan());
    out.push_str(&field("Title", &preview.title));
    out.push_str(&field("Uploader", &preview.uploader));
    out.push_str(&field("Duration", format_duration(preview.duration)));
    out.push_str(&field("Quality", preview.quality));
    out.push_str(&field(
        "Mode",
        if preview.audio_only {
            "Audio Only"
        } else {
            "Video + Audio"
        },
    ));
    out.push_str(&field("Format", &preview.format_string));
    out.push_str(&field("Output Directory", preview.output_dir.display()));
    out.push_str(&field("Estimated File", &preview.estimated_filename));
    out
}

/// Spinner shown while metadata is fetched
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Progress sink drawing yt-dlp's progress on a terminal bar
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    const SCALE: u64 = 1000;

    pub fn new() -> Self {
        let bar = ProgressBar::new(Self::SCALE);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:30.cyan/white} {msg}").map(|s| s.progress_chars("=> "))
        {
            bar.set_style(style);
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn emit(&mut self, event: ProgressEvent) {
        match event.status {
            ProgressStatus::Downloading => {
                if let Some(fraction) = event.fraction() {
                    self.bar
                        .set_position((fraction as f64 * Self::SCALE as f64) as u64);
                }
                self.bar.set_message(format!(
                    "Downloading... {} at {}",
                    event.percent.as_deref().unwrap_or("N/A"),
                    event.speed.as_deref().unwrap_or("N/A")
                ));
            }
            ProgressStatus::Finished => {
                self.bar.set_position(Self::SCALE);
                self.bar.println(
                    format!(
                        "Download finished: {}",
                        event.filename.as_deref().unwrap_or("")
                    )
                    .green()
                    .to_string(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Format;
    use crate::selection::normalize;

    fn catalog() -> Vec<NormalizedFormat> {
        normalize(vec![
            Format {
                format_id: "22".into(),
                ext: "mp4".into(),
                vcodec: Some("avc1.64001F".into()),
                acodec: Some("mp4a.40.2".into()),
                height: Some(720),
                fps: Some(30.0),
                ..Default::default()
            },
            Format {
                format_id: "137".into(),
                ext: "mp4".into(),
                vcodec: Some("avc1.640028".into()),
                acodec: Some("none".into()),
                height: Some(1080),
                filesize: Some(12 * 1024 * 1024),
                ..Default::default()
            },
            Format {
                format_id: "140".into(),
                ext: "m4a".into(),
                vcodec: Some("none".into()),
                acodec: Some("mp4a.40.2".into()),
                abr: Some(128.0),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_listing_marks_best() {
        colored::control::set_override(false);
        let listing = format_listing("Clip", &catalog(), Quality::Best, false);

        assert!(listing.contains("  22: 720p mp4 avc1.64001F 30fps [Video+Audio] ← SELECTED"));
        assert!(listing.contains("  137: 1080p mp4 avc1.640028 [Video Only] (12MB)\n"));
        assert!(listing.contains("  140: m4a mp4a.40.2 128kbps\n"));
    }

    #[test]
    fn test_listing_audio_only_hides_video() {
        colored::control::set_override(false);
        let listing = format_listing("Clip", &catalog(), Quality::AudioOnly, true);

        assert!(listing.contains("Mode: Audio Only"));
        assert!(!listing.contains("VIDEO FORMATS"));
        assert!(listing.contains("  140: m4a mp4a.40.2 128kbps ← SELECTED"));
    }

    #[test]
    fn test_info_truncates_description() {
        colored::control::set_override(false);
        let info = VideoInfo {
            title: "Clip".into(),
            duration: Some(61.0),
            view_count: Some(12345),
            upload_date: Some("20240102".into()),
            description: Some("x".repeat(300)),
            ..Default::default()
        };

        let text = format_info(&info);
        assert!(text.contains("Duration: 1:01"));
        assert!(text.contains("View Count: 12,345"));
        assert!(text.contains("Upload Date: 2024-01-02"));
        assert!(text.contains(&format!("Description: {}...", "x".repeat(200))));
    }
}
