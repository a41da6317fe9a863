//! ytloader - YouTube Video Downloader
//!
//! With a URL the command-line flow runs; without one (or with `--gui`) the
//! window opens.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ytloader::cli::{self, CliOptions};
use ytloader::downloader::DownloadService;
use ytloader::extractor::validate_url;
use ytloader::selection::{validate_output_format, Quality, QUALITY_PRESETS};
use ytloader::utils::{absolute, AppSettings};
use ytloader::YtLoaderError;

#[derive(Parser, Debug)]
#[command(
    name = "ytloader",
    version,
    about = "Download YouTube videos using yt-dlp",
    after_help = after_help()
)]
struct Args {
    /// YouTube video URL; without one the GUI opens
    url: Option<String>,

    /// Output directory (default: last used, initially ./downloads)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Video quality: best, worst, 4k or a height such as 1080
    #[arg(short, long, value_parser = parse_quality)]
    quality: Option<Quality>,

    /// Download audio only
    #[arg(long)]
    audio_only: bool,

    /// Output format (mp4, webm, mkv, avi, mp3, m4a, wav, flac, ogg)
    #[arg(long, value_parser = parse_format)]
    format: Option<String>,

    /// Show video information without downloading
    #[arg(long)]
    info: bool,

    /// List all available formats for the video
    #[arg(long)]
    list_formats: bool,

    /// Interactive mode - choose format from available options
    #[arg(short, long)]
    interactive: bool,

    /// Open the GUI even when a URL is given
    #[arg(long)]
    gui: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_quality(token: &str) -> Result<Quality, YtLoaderError> {
    token.parse()
}

fn parse_format(format: &str) -> Result<String, YtLoaderError> {
    validate_output_format(format)
}

fn after_help() -> String {
    let mut help = String::from("Quality presets:\n");
    for (token, description) in QUALITY_PRESETS {
        help.push_str(&format!("  {:<8} {}\n", token, description));
    }
    help.push_str(
        "\nExamples:\n  \
         ytloader \"https://www.youtube.com/watch?v=VIDEO_ID\"\n  \
         ytloader -i \"https://www.youtube.com/watch?v=VIDEO_ID\"\n  \
         ytloader -q 1080 -o downloads \"https://www.youtube.com/watch?v=VIDEO_ID\"\n  \
         ytloader --audio-only --format mp3 \"https://www.youtube.com/watch?v=VIDEO_ID\"\n  \
         ytloader --list-formats \"https://www.youtube.com/watch?v=VIDEO_ID\"\n\n\
         Note: 1080p and above needs FFmpeg to merge video and audio streams.",
    );
    help
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,ytloader=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = AppSettings::load();
    if let Some(output) = &args.output {
        settings.download_location = absolute(output);
    }

    match args.url.clone() {
        Some(url) if !args.gui => {
            if let Err(e) = run_cli(url, args, settings) {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
            Ok(())
        }
        _ => ytloader::gui::launch(settings),
    }
}

fn run_cli(url: String, args: Args, settings: AppSettings) -> Result<()> {
    if validate_url(&url).is_err() {
        anyhow::bail!("Please provide a valid YouTube URL");
    }

    let output_format = match args.format {
        Some(format) => Some(format),
        None if args.audio_only => Some(settings.audio_format.clone()),
        None => None,
    };

    let options = CliOptions {
        url,
        quality: args.quality.unwrap_or(settings.quality),
        audio_only: args.audio_only,
        output_format,
        info: args.info,
        list_formats: args.list_formats,
        interactive: args.interactive,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = DownloadService::with_ytdlp(&settings.download_location)?;
        cli::run(&service, options).await
    })
}
