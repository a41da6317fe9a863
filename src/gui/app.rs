//! Main GUI application

use crate::backend::{BackendCommand, BackendEvent};
use crate::extractor::{validate_url, VideoInfo};
use crate::gui::components::{format_table, status_bar, status_for, url_input, video_info};
use crate::gui::{clipboard, theme};
use crate::selection::{request_for, NormalizedFormat, Quality, QualityRequest, QUALITY_PRESETS};
use crate::utils::AppSettings;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Application, Command, Element, Length, Subscription, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Which kind of download the preset button starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Video,
    Audio,
}

/// Entry of the quality pick list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetChoice(pub Quality);

impl fmt::Display for PresetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.description())
    }
}

/// Presets in menu order, one entry per distinct quality
pub fn preset_choices() -> Vec<PresetChoice> {
    let mut choices: Vec<PresetChoice> = Vec::new();
    for (token, _) in QUALITY_PRESETS {
        if let Ok(quality) = token.parse::<Quality>() {
            if !choices.iter().any(|c| c.0 == quality) {
                choices.push(PresetChoice(quality));
            }
        }
    }
    choices
}

/// Everything the window needs from the launcher
pub struct GuiFlags {
    pub settings: AppSettings,
    /// Runtime the backend actor is spawned on
    pub runtime: Arc<Runtime>,
    pub commands: mpsc::Sender<BackendCommand>,
    pub events: mpsc::Receiver<BackendEvent>,
}

/// Main application state
pub struct YtLoaderApp {
    // Backend
    _runtime: Arc<Runtime>,
    commands: mpsc::Sender<BackendCommand>,
    events: mpsc::Receiver<BackendEvent>,

    settings: AppSettings,

    // UI State
    url_input: String,
    url_error: Option<String>,
    output_dir: String,
    mode: Mode,
    preset: PresetChoice,
    info: Option<VideoInfo>,
    formats: Vec<NormalizedFormat>,
    selected: Option<usize>,
    status: String,
    progress: Option<f32>,
    busy: bool,
    completed_dir: Option<PathBuf>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlInputChanged(String),
    PasteUrl,
    GetInfo,

    // Options
    ModeSelected(Mode),
    PresetSelected(PresetChoice),
    OutputDirChanged(String),
    BrowseOutputDir,

    // Formats
    LoadFormats,
    FormatSelected(usize),

    // Download
    DownloadSelected,
    DownloadPreset,
    OpenFolder,

    // System
    Tick,
}

impl Application for YtLoaderApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = GuiFlags;

    fn new(flags: GuiFlags) -> (Self, Command<Message>) {
        let settings = flags.settings;

        let app = Self {
            _runtime: flags.runtime,
            commands: flags.commands,
            events: flags.events,
            url_input: String::new(),
            url_error: None,
            output_dir: settings.download_location.to_string_lossy().to_string(),
            mode: Mode::default(),
            preset: PresetChoice(settings.quality),
            info: None,
            formats: Vec::new(),
            selected: None,
            status: "Ready".to_string(),
            progress: None,
            busy: false,
            completed_dir: None,
            settings,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("YtLoader - YouTube Video Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                self.url_error = None;
            }

            Message::PasteUrl => match clipboard::read_url() {
                Ok(content) => {
                    self.url_input = content;
                    self.url_error = None;
                    self.status = "URL pasted from clipboard".to_string();
                }
                Err(e) => self.status = e,
            },

            Message::GetInfo => {
                if let Some(url) = self.checked_url("Please enter a YouTube URL") {
                    self.status = "Fetching video info...".to_string();
                    self.send(BackendCommand::FetchInfo { url });
                }
            }

            Message::ModeSelected(mode) => {
                if mode != self.mode {
                    self.mode = mode;
                    self.selected = None;
                    self.status = "Mode changed - please select a format".to_string();
                }
            }

            Message::PresetSelected(choice) => {
                self.preset = choice;
                self.settings.quality = choice.0;
            }

            Message::OutputDirChanged(dir) => {
                self.output_dir = dir;
            }

            Message::BrowseOutputDir => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_directory(&self.output_dir)
                    .pick_folder()
                {
                    self.output_dir = path.to_string_lossy().to_string();
                }
            }

            Message::LoadFormats => {
                if let Some(url) = self.checked_url("Please enter a YouTube URL first") {
                    self.status = "Loading available formats...".to_string();
                    self.send(BackendCommand::LoadFormats { url });
                }
            }

            Message::FormatSelected(index) => {
                if let Some(format) = self.formats.get(index) {
                    self.selected = Some(index);
                    self.status = format!("Selected: {} - {}", format.kind, format.quality);
                }
            }

            Message::DownloadSelected => {
                let request = self
                    .selected
                    .and_then(|i| self.formats.get(i))
                    .map(request_for);
                match request {
                    Some(request) => self.start_download(request),
                    None => self.status = "Please select a format first".to_string(),
                }
            }

            Message::DownloadPreset => {
                let request = match self.mode {
                    Mode::Video => QualityRequest::new(self.preset.0),
                    Mode::Audio => QualityRequest::new(Quality::AudioOnly)
                        .with_output_format(self.settings.audio_format.clone()),
                };
                self.start_download(request);
            }

            Message::OpenFolder => {
                if let Some(dir) = &self.completed_dir {
                    if let Err(e) = open::that(dir) {
                        warn!("Failed to open folder {:?}: {}", dir, e);
                        self.status = format!("Failed to open folder: {}", e);
                    }
                }
            }

            Message::Tick => {
                while let Ok(event) = self.events.try_recv() {
                    self.handle_backend_event(event);
                }
            }
        }

        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let header = text("YouTube Video Downloader")
            .size(24)
            .style(iced::theme::Text::Color(theme::TEXT_PRIMARY));

        let url_section = panel(
            "Video URL",
            url_input(&self.url_input, self.busy, self.url_error.as_deref()),
        );

        let info_section = panel("Video Information", video_info(self.info.as_ref()));

        let mode_toggle = row![
            mode_button("Video", Mode::Video, self.mode),
            mode_button("Audio Only", Mode::Audio, self.mode),
        ]
        .spacing(4);

        let options_section = panel(
            "Download Options",
            column![
                row![
                    text("Mode:").size(14).width(Length::Fixed(70.0)),
                    mode_toggle,
                    pick_list(preset_choices(), Some(self.preset), Message::PresetSelected)
                        .text_size(13)
                        .padding([6, 10]),
                ]
                .spacing(12)
                .align_items(Alignment::Center),
                row![
                    text("Output:").size(14).width(Length::Fixed(70.0)),
                    text_input("Output directory", &self.output_dir)
                        .on_input(Message::OutputDirChanged)
                        .padding(8)
                        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle {
                            error: false,
                        }))),
                    secondary_button("Browse", Some(Message::BrowseOutputDir)),
                ]
                .spacing(12)
                .align_items(Alignment::Center),
            ]
            .spacing(10),
        );

        let formats_loaded = !self.formats.is_empty();
        let formats_section = panel(
            "Available Formats",
            column![
                row![
                    secondary_button(
                        "Load Available Formats",
                        (!self.busy).then_some(Message::LoadFormats)
                    ),
                    secondary_button(
                        "Refresh",
                        (!self.busy && formats_loaded).then_some(Message::LoadFormats)
                    ),
                ]
                .spacing(8),
                format_table(&self.formats, self.selected),
            ]
            .spacing(10),
        );

        let mut actions = row![
            primary_button(
                "Download Selected Format",
                (!self.busy && self.selected.is_some()).then_some(Message::DownloadSelected)
            ),
            secondary_button(
                match self.mode {
                    Mode::Video => "Download Preset",
                    Mode::Audio => "Download Audio",
                },
                (!self.busy).then_some(Message::DownloadPreset)
            ),
        ]
        .spacing(8)
        .align_items(Alignment::Center);
        if self.completed_dir.is_some() && !self.busy {
            actions = actions.push(secondary_button("Open folder", Some(Message::OpenFolder)));
        }

        let download_section = panel(
            "Download",
            column![
                actions,
                status_bar(&self.status, self.progress, self.completed_dir.is_some() && !self.busy),
            ]
            .spacing(10),
        );

        let content = column![
            header,
            url_section,
            info_section,
            options_section,
            formats_section,
            download_section,
        ]
        .spacing(14)
        .padding(20);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::CanvasContainer)))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(100)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl YtLoaderApp {
    /// Trimmed URL when it is present and supported; sets the field error otherwise
    fn checked_url(&mut self, empty_message: &str) -> Option<String> {
        let url = self.url_input.trim();
        if url.is_empty() {
            self.url_error = Some(empty_message.to_string());
            return None;
        }
        if validate_url(url).is_err() {
            self.url_error = Some("Please provide a valid YouTube URL".to_string());
            return None;
        }
        Some(url.to_string())
    }

    fn start_download(&mut self, request: QualityRequest) {
        let Some(url) = self.checked_url("Please enter a YouTube URL") else {
            return;
        };

        let output_dir = self.output_dir.trim();
        if output_dir.is_empty() {
            self.status = "Please specify an output directory".to_string();
            return;
        }
        let output_dir = PathBuf::from(output_dir);

        self.settings.download_location = output_dir.clone();
        if let Err(e) = self.settings.save() {
            warn!("Failed to save settings: {}", e);
        }

        info!("Starting download of {} ({})", url, request.quality);
        self.completed_dir = None;
        self.progress = Some(0.0);
        self.status = "Downloading...".to_string();
        self.send(BackendCommand::StartDownload {
            url,
            request,
            output_dir,
        });
    }

    fn send(&mut self, command: BackendCommand) {
        debug!("Sending backend command: {:?}", command);
        match self.commands.try_send(command) {
            Ok(()) => self.busy = true,
            Err(e) => {
                warn!("Backend unavailable: {}", e);
                self.status = "Backend unavailable, please restart the application".to_string();
                self.progress = None;
            }
        }
    }

    fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::InfoLoaded(result) => {
                self.busy = false;
                match result {
                    Ok(info) => {
                        self.status = format!("Loaded: {}", info.title);
                        self.info = Some(info);
                    }
                    Err(e) => {
                        self.info = None;
                        self.status = e;
                    }
                }
            }
            BackendEvent::FormatsLoaded(result) => {
                self.busy = false;
                match result {
                    Ok(formats) => {
                        self.status = format!("Found {} available formats", formats.len());
                        self.formats = formats;
                        self.selected = None;
                    }
                    Err(e) => self.status = format!("Error loading formats: {}", e),
                }
            }
            BackendEvent::Progress(event) => {
                self.status = status_for(&event);
                if let Some(fraction) = event.fraction() {
                    self.progress = Some(fraction);
                }
            }
            BackendEvent::DownloadFinished(result) => {
                self.busy = false;
                match result {
                    Ok(done) => {
                        self.status = done.message;
                        self.progress = Some(1.0);
                        self.completed_dir = Some(done.output_dir);
                    }
                    Err(e) => {
                        self.status = format!("Download failed: {}", e);
                        self.progress = None;
                    }
                }
            }
        }
    }
}

impl Drop for YtLoaderApp {
    fn drop(&mut self) {
        if let Err(e) = self.commands.try_send(BackendCommand::Shutdown) {
            warn!("Could not ask the backend to shut down: {}", e);
        }
    }
}

fn panel<'a>(title: &str, body: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        column![
            text(title)
                .size(15)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
            body.into(),
        ]
        .spacing(10),
    )
    .width(Length::Fill)
    .padding(14)
    .style(iced::theme::Container::Custom(Box::new(theme::PanelContainer)))
    .into()
}

fn mode_button<'a>(label: &str, mode: Mode, current: Mode) -> Element<'a, Message> {
    button(text(label).size(14))
        .padding([6, 14])
        .style(iced::theme::Button::Custom(Box::new(if mode == current {
            theme::ToggleButton::On
        } else {
            theme::ToggleButton::Off
        })))
        .on_press(Message::ModeSelected(mode))
        .into()
}

fn primary_button<'a>(label: &str, on_press: Option<Message>) -> Element<'a, Message> {
    button(text(label).size(14))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))
        .on_press_maybe(on_press)
        .into()
}

fn secondary_button<'a>(label: &str, on_press: Option<Message>) -> Element<'a, Message> {
    button(text(label).size(14))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
        .on_press_maybe(on_press)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_channels() -> (
        YtLoaderApp,
        mpsc::Receiver<BackendCommand>,
        mpsc::Sender<BackendEvent>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(4);
        let (event_tx, event_rx) = mpsc::channel(4);
        let (app, _) = YtLoaderApp::new(GuiFlags {
            settings: AppSettings::default(),
            runtime: Arc::new(Runtime::new().unwrap()),
            commands: command_tx,
            events: event_rx,
        });
        (app, command_rx, event_tx)
    }

    #[test]
    fn test_drop_asks_backend_to_shut_down() {
        let (app, mut commands, _events) = app_with_channels();
        drop(app);
        assert!(matches!(commands.try_recv(), Ok(BackendCommand::Shutdown)));
    }

    #[test]
    fn test_drop_with_backend_gone_does_not_panic() {
        let (app, commands, _events) = app_with_channels();
        drop(commands);
        drop(app);
    }

    #[test]
    fn test_preset_choices_are_distinct() {
        let choices = preset_choices();

        assert_eq!(choices.first(), Some(&PresetChoice(Quality::Best)));
        assert_eq!(choices.last(), Some(&PresetChoice(Quality::Worst)));
        assert_eq!(
            choices
                .iter()
                .filter(|c| c.0 == Quality::Height(2160))
                .count(),
            1
        );
        assert_eq!(choices.len(), 8);
    }

    #[test]
    fn test_preset_label() {
        assert_eq!(
            PresetChoice(Quality::Height(1080)).to_string(),
            "Full HD (1080p)"
        );
    }
}
