//! Video information panel

use crate::extractor::VideoInfo;
use crate::gui::app::Message;
use crate::gui::theme;
use crate::utils::display::{format_count, format_duration, format_upload_date};
use iced::widget::{column, text, Column};
use iced::Element;

/// Label/value pairs shown for a fetched video
pub fn info_lines(info: &VideoInfo) -> Vec<(&'static str, String)> {
    vec![
        ("Title", info.title.clone()),
        ("Uploader", info.uploader_or_na().to_string()),
        ("Duration", format_duration(info.duration_secs())),
        ("Views", format_count(info.view_count.unwrap_or(0))),
        (
            "Upload Date",
            info.upload_date
                .as_deref()
                .map(format_upload_date)
                .unwrap_or_else(|| "N/A".to_string()),
        ),
    ]
}

pub fn video_info<'a>(info: Option<&VideoInfo>) -> Element<'a, Message> {
    let Some(info) = info else {
        return column![text("Enter a URL and press \"Get Video Info\"")
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY))]
        .into();
    };

    let lines: Vec<Element<'a, Message>> = info_lines(info)
        .into_iter()
        .map(|(label, value)| text(format!("{}: {}", label, value)).size(14).into())
        .collect();

    Column::with_children(lines).spacing(4).into()
}
