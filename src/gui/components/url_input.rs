//! URL input component

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

/// URL field with paste and "Get Video Info" buttons, plus an optional error line
pub fn url_input<'a>(value: &str, busy: bool, error_message: Option<&'a str>) -> Element<'a, Message> {
    let input_row = row![
        text_input("https://www.youtube.com/watch?v=...", value)
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::GetInfo)
            .padding(10)
            .width(Length::Fill)
            .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle {
                error: error_message.is_some(),
            }))),
        tooltip(
            button(text("Paste").size(14))
                .on_press(Message::PasteUrl)
                .padding([8, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Get Video Info").size(14))
            .on_press_maybe((!busy && !value.trim().is_empty()).then_some(Message::GetInfo))
            .padding([8, 16])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    match error_message {
        Some(error) => column![
            input_row,
            text(error)
                .size(13)
                .style(iced::theme::Text::Color(theme::DANGER)),
        ]
        .spacing(6)
        .into(),
        None => input_row.into(),
    }
}
