//! GUI module

pub mod app;
pub mod clipboard;
pub mod components;
pub mod theme;

// Re-export for convenience
pub use app::{GuiFlags, Message, YtLoaderApp};

use crate::backend::BackendActor;
use crate::downloader::DownloadService;
use crate::utils::AppSettings;
use iced::Application;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Start the backend actor and run the window until it is closed
pub fn launch(settings: AppSettings) -> anyhow::Result<()> {
    let runtime = Arc::new(tokio::runtime::Runtime::new()?);
    let (command_tx, command_rx) = mpsc::channel(32);
    let (event_tx, event_rx) = mpsc::channel(256);

    let service = match DownloadService::with_ytdlp(&settings.download_location) {
        Ok(service) => Some(service),
        Err(e) => {
            warn!("{}; video info and downloads will fail until it is installed", e);
            None
        }
    };
    runtime.spawn(BackendActor::new(service, command_rx, event_tx).run());

    info!("Starting GUI");
    YtLoaderApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(900.0, 820.0),
            min_size: Some(iced::Size::new(760.0, 600.0)),
            ..Default::default()
        },
        antialiasing: true,
        ..iced::Settings::with_flags(GuiFlags {
            settings,
            runtime,
            commands: command_tx,
            events: event_rx,
        })
    })?;

    Ok(())
}
