//! Download status line and progress bar

use crate::downloader::{ProgressEvent, ProgressStatus};
use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{column, progress_bar, text};
use iced::{Element, Length};

/// Status text for a progress event
pub fn status_for(event: &ProgressEvent) -> String {
    match event.status {
        ProgressStatus::Downloading => match event.percent.as_deref() {
            Some(percent) => format!("Downloading... {}", percent),
            None => "Downloading... N/A".to_string(),
        },
        ProgressStatus::Finished => "Processing...".to_string(),
    }
}

/// Progress bar (when a download has reported progress) above the status text
pub fn status_bar<'a>(status: &str, progress: Option<f32>, succeeded: bool) -> Element<'a, Message> {
    let status_text = text(status.to_string())
        .size(14)
        .style(iced::theme::Text::Color(if succeeded {
            theme::SUCCESS
        } else {
            theme::TEXT_SECONDARY
        }));

    match progress {
        Some(value) => column![
            progress_bar(0.0..=1.0, value)
                .height(Length::Fixed(8.0))
                .style(iced::theme::ProgressBar::Custom(Box::new(
                    theme::ProgressBarStyle { done: succeeded }
                ))),
            status_text,
        ]
        .spacing(6)
        .into(),
        None => status_text.into(),
    }
}
