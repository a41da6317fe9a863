//! Style sheets for the downloader window

use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Palette ---

pub const CANVAS: Color = Color::from_rgb(0.961, 0.965, 0.973);
pub const PANEL: Color = Color::from_rgb(1.0, 1.0, 1.0);

pub const ACCENT: Color = Color::from_rgb(0.863, 0.157, 0.176); // Primary actions
pub const ACCENT_HOVER: Color = Color::from_rgb(0.933, 0.251, 0.267);
pub const ACCENT_SOFT: Color = Color::from_rgb(0.996, 0.902, 0.906); // Selected rows

pub const SUCCESS: Color = Color::from_rgb(0.063, 0.725, 0.506);
pub const DANGER: Color = Color::from_rgb(0.937, 0.267, 0.267);

pub const TEXT_PRIMARY: Color = Color::from_rgb(0.122, 0.161, 0.216);
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.420, 0.447, 0.502);
pub const BORDER: Color = Color::from_rgb(0.898, 0.906, 0.922);
pub const ROW_HOVER: Color = Color::from_rgb(0.953, 0.957, 0.965);

// --- Containers ---

pub struct CanvasContainer;

impl container::StyleSheet for CanvasContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(CANVAS)),
            ..Default::default()
        }
    }
}

/// White card grouping one section of the window
pub struct PanelContainer;

impl container::StyleSheet for PanelContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(PANEL)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
        }
    }
}

// --- Buttons ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(ACCENT)),
            text_color: PANEL,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.863, 0.157, 0.176, 0.25),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 6.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(ACCENT_HOVER)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.863, 0.157, 0.176, 0.4))),
            shadow: Shadow::default(),
            ..active
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(PANEL)),
            text_color: TEXT_PRIMARY,
            border: Border {
                radius: 8.0.into(),
                color: BORDER,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(ROW_HOVER)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: TEXT_SECONDARY,
            ..self.active(style)
        }
    }
}

/// Video/Audio mode switch
pub enum ToggleButton {
    On,
    Off,
}

impl button::StyleSheet for ToggleButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color) = match self {
            Self::On => (ACCENT, PANEL),
            Self::Off => (PANEL, TEXT_SECONDARY),
        };
        button::Appearance {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: 8.0.into(),
                color: if matches!(self, Self::On) { ACCENT } else { BORDER },
                width: 1.0,
            },
            ..Default::default()
        }
    }
}

/// One clickable row of the format table
pub struct FormatRow {
    pub selected: bool,
}

impl button::StyleSheet for FormatRow {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: self
                .selected
                .then_some(Background::Color(ACCENT_SOFT)),
            text_color: TEXT_PRIMARY,
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        if self.selected {
            active
        } else {
            button::Appearance {
                background: Some(Background::Color(ROW_HOVER)),
                ..active
            }
        }
    }
}

// --- Inputs ---

pub struct InputStyle {
    pub error: bool,
}

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(PANEL),
            border: Border {
                radius: 8.0.into(),
                width: 1.0,
                color: if self.error { DANGER } else { BORDER },
            },
            icon_color: TEXT_SECONDARY,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: if self.error { DANGER } else { ACCENT },
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        TEXT_SECONDARY
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        TEXT_PRIMARY
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.863, 0.157, 0.176, 0.25)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(ROW_HOVER),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        TEXT_SECONDARY
    }
}

// --- Progress ---

pub struct ProgressBarStyle {
    pub done: bool,
}

impl iced::widget::progress_bar::StyleSheet for ProgressBarStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> iced::widget::progress_bar::Appearance {
        iced::widget::progress_bar::Appearance {
            background: Background::Color(BORDER),
            bar: Background::Color(if self.done { SUCCESS } else { ACCENT }),
            border_radius: 4.0.into(),
        }
    }
}
