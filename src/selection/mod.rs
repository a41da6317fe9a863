//! Format selection policy
//!
//! Turns the extractor's raw format list into a ranked catalog, builds the
//! interactive menu from it, and maps quality requests onto yt-dlp selectors.

pub mod catalog;
pub mod options;
pub mod quality;

pub use catalog::{normalize, sort_catalog, NormalizedFormat, StreamKind};
pub use options::{
    build_options, cancel_ordinal, find_option, request_for, would_select, SelectionOption,
    MAX_AUDIO_OPTIONS,
};
pub use quality::{
    audio_codec_for, resolve, validate_output_format, DownloadPlan, PostProcessor, Quality,
    QualityRequest, SelectionExpression, AUDIO_FORMATS, DEFAULT_AUDIO_FORMAT,
    DEFAULT_AUDIO_QUALITY, EXTRACT_AUDIO_CODECS, QUALITY_PRESETS, SUPPORTED_HEIGHTS,
    VIDEO_FORMATS,
};
