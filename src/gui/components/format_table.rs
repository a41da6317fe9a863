//! Table of available formats with single-row selection

use crate::gui::app::Message;
use crate::gui::theme;
use crate::selection::NormalizedFormat;
use iced::widget::{button, column, container, scrollable, text, Column, Row};
use iced::{Element, Length};

/// Column headings, in display order
pub const COLUMNS: [&str; 5] = ["Type", "Quality", "Format", "Codec", "Size (MB)"];

const CODEC_COLUMN_CHARS: usize = 15;

/// Cell texts for one catalog entry
pub fn row_cells(format: &NormalizedFormat) -> [String; 5] {
    [
        format.kind.to_string(),
        format.quality.clone(),
        format.ext().to_string(),
        format.codec.chars().take(CODEC_COLUMN_CHARS).collect(),
        if format.size_mb > 0 {
            format.size_mb.to_string()
        } else {
            String::new()
        },
    ]
}

fn cells<'a>(values: [String; 5], size: u16) -> Row<'a, Message> {
    let widths = [3, 3, 2, 3, 2];
    let cells: Vec<Element<'a, Message>> = values
        .into_iter()
        .zip(widths)
        .map(|(value, portion)| {
            text(value)
                .size(size)
                .width(Length::FillPortion(portion))
                .into()
        })
        .collect();

    Row::with_children(cells).spacing(8)
}

/// Header plus one selectable row per format
pub fn format_table<'a>(formats: &[NormalizedFormat], selected: Option<usize>) -> Element<'a, Message> {
    if formats.is_empty() {
        return container(
            text("No formats loaded")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        )
        .padding(12)
        .into();
    }

    let header = cells(COLUMNS.map(str::to_string), 13).padding([4, 8]);

    let items: Vec<Element<'a, Message>> = formats
        .iter()
        .enumerate()
        .map(|(index, format)| {
            button(cells(row_cells(format), 13))
                .width(Length::Fill)
                .padding([4, 8])
                .style(iced::theme::Button::Custom(Box::new(theme::FormatRow {
                    selected: selected == Some(index),
                })))
                .on_press(Message::FormatSelected(index))
                .into()
        })
        .collect();

    let rows = Column::with_children(items).spacing(2);

    column![
        header,
        scrollable(rows).height(Length::Fixed(240.0)),
    ]
    .spacing(4)
    .into()
}
