//! Command-line flow: info, format listing, interactive selection and download

pub mod output;
pub mod prompt;

use crate::downloader::DownloadService;
use crate::selection::{build_options, cancel_ordinal, normalize, Quality, QualityRequest};
use anyhow::Context;
use colored::*;
use std::io;
use tracing::debug;

/// What the user asked for on the command line
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub url: String,
    pub quality: Quality,
    pub audio_only: bool,
    pub output_format: Option<String>,
    pub info: bool,
    pub list_formats: bool,
    pub interactive: bool,
}

impl CliOptions {
    /// Request described by the flags; `--audio-only` wins over `--quality`
    pub fn request(&self) -> QualityRequest {
        let quality = if self.audio_only {
            Quality::AudioOnly
        } else {
            self.quality
        };
        QualityRequest {
            quality,
            output_format: self.output_format.clone(),
        }
    }
}

pub async fn run(service: &DownloadService, options: CliOptions) -> anyhow::Result<()> {
    println!("{}", output::banner());

    if options.info {
        let spinner = output::spinner("Fetching video information...");
        let info = service.video_info(&options.url).await;
        spinner.finish_and_clear();
        print!("{}", output::format_info(&info?));
    } else if options.list_formats {
        list_formats(service, &options).await?;
    } else {
        download(service, &options).await?;
    }

    Ok(())
}

async fn list_formats(service: &DownloadService, options: &CliOptions) -> anyhow::Result<()> {
    let spinner = output::spinner("Fetching available formats...");
    let info = service.video_info(&options.url).await;
    spinner.finish_and_clear();

    let info = info?;
    let catalog = normalize(info.formats.clone());
    print!(
        "{}",
        output::format_listing(
            &info.title,
            &catalog,
            options.request().quality,
            options.audio_only
        )
    );
    Ok(())
}

async fn download(service: &DownloadService, options: &CliOptions) -> anyhow::Result<()> {
    let request = if options.interactive {
        match choose_interactively(service, &options.url).await? {
            Some(request) => request,
            None => {
                println!("{}", "Download cancelled by user.".yellow());
                return Ok(());
            }
        }
    } else {
        options.request()
    };
    debug!("Resolved request: {:?}", request);

    let spinner = output::spinner("Preparing download...");
    let preview = service.preview(&options.url, &request).await;
    spinner.finish_and_clear();
    println!("{}", output::format_preview(&preview?));

    let proceed = tokio::task::spawn_blocking(|| {
        prompt::confirm(
            "Do you want to proceed with the download?",
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )
    })
    .await
    .context("confirmation prompt failed")??;
    if !proceed {
        println!("{}", "Download cancelled by user.".yellow());
        return Ok(());
    }

    println!("{}", "Starting download...".cyan());
    let mut progress = output::TerminalProgress::new();
    let result = service.download(&options.url, &request, &mut progress).await;
    progress.finish();

    let result = result?;
    println!("{}", format!("✓ {}", result.message).green());
    println!(
        "{} {}",
        "Saved to:".green(),
        result.output_dir.display()
    );
    Ok(())
}

/// Show the option menu; `None` when the user cancels
async fn choose_interactively(
    service: &DownloadService,
    url: &str,
) -> anyhow::Result<Option<QualityRequest>> {
    let spinner = output::spinner("Fetching available formats...");
    let info = service.video_info(url).await;
    spinner.finish_and_clear();
    let info = info?;

    let options = build_options(&normalize(info.formats.clone()));
    let cancel = cancel_ordinal(&options);
    print!("{}", output::format_menu(&info, &options, cancel));

    let selected = tokio::task::spawn_blocking(move || {
        prompt::choose_option(&options, cancel, &mut io::stdin().lock(), &mut io::stdout())
    })
    .await
    .context("selection prompt failed")??;

    Ok(selected.map(|option| option.request()))
}
