//! Interactive menu built from a normalized catalog

use crate::selection::catalog::{NormalizedFormat, StreamKind};
use crate::selection::quality::{Quality, QualityRequest, SUPPORTED_HEIGHTS};
use std::collections::HashSet;

/// Audio formats considered for the menu
pub const MAX_AUDIO_OPTIONS: usize = 3;

/// One numbered menu entry
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOption {
    /// 1-based position in the menu
    pub ordinal: usize,
    pub kind: StreamKind,
    pub label: String,
    pub format: NormalizedFormat,
}

impl SelectionOption {
    pub fn is_audio(&self) -> bool {
        !self.kind.is_video()
    }

    /// The request that picking this entry stands for
    pub fn request(&self) -> QualityRequest {
        request_for(&self.format)
    }
}

/// Request downloading a catalog entry stands for: audio entries keep their
/// container, video entries cap at their height.
pub fn request_for(format: &NormalizedFormat) -> QualityRequest {
    match (format.kind, format.height()) {
        (StreamKind::AudioOnly, _) => {
            QualityRequest::new(Quality::AudioOnly).with_output_format(format.ext())
        }
        (_, Some(height)) if height > 0 => QualityRequest::new(Quality::Height(height)),
        _ => QualityRequest::new(Quality::Best),
    }
}

/// Build the menu: one entry per distinct video height, then up to three
/// distinct audio encodings.
pub fn build_options(catalog: &[NormalizedFormat]) -> Vec<SelectionOption> {
    let mut options = Vec::new();

    let mut heights_shown = HashSet::new();
    for fmt in catalog.iter().filter(|f| f.kind.is_video()) {
        let Some(height) = fmt.height() else {
            continue;
        };
        if heights_shown.insert(height) {
            options.push(SelectionOption {
                ordinal: options.len() + 1,
                kind: fmt.kind,
                label: format!(
                    "{}p {} {}",
                    height,
                    fmt.ext(),
                    fmt.codec.chars().take(10).collect::<String>()
                ),
                format: fmt.clone(),
            });
        }
    }

    let mut audio_shown = HashSet::new();
    for fmt in catalog
        .iter()
        .filter(|f| f.kind == StreamKind::AudioOnly)
        .take(MAX_AUDIO_OPTIONS)
    {
        let key = (
            fmt.format.acodec_or_none().to_string(),
            fmt.ext().to_string(),
            fmt.format.abr.map(f32::to_bits),
        );
        if audio_shown.insert(key) {
            options.push(SelectionOption {
                ordinal: options.len() + 1,
                kind: fmt.kind,
                label: format!(
                    "Audio {} {} {}",
                    fmt.ext(),
                    fmt.format.acodec_or_none(),
                    fmt.format
                        .abr
                        .map(|abr| format!("{}kbps", abr))
                        .unwrap_or_else(|| "unknown bitrate".to_string())
                ),
                format: fmt.clone(),
            });
        }
    }

    options
}

/// Ordinal of the synthetic "cancel" entry appended after the options
pub fn cancel_ordinal(options: &[SelectionOption]) -> usize {
    options.len() + 1
}

/// Look up an entry by its ordinal
pub fn find_option(options: &[SelectionOption], ordinal: usize) -> Option<&SelectionOption> {
    options.iter().find(|opt| opt.ordinal == ordinal)
}

/// Whether a listed video format is the one a quality preset would highlight.
///
/// `Best` marks every muxed stream with a known height; preset heights mark
/// exact matches. Custom heights, `Worst` and audio requests mark nothing.
pub fn would_select(format: &NormalizedFormat, quality: Quality) -> bool {
    match quality {
        Quality::Best => {
            format.kind == StreamKind::VideoWithAudio && format.height().unwrap_or(0) > 0
        }
        Quality::Height(target) if SUPPORTED_HEIGHTS.contains(&target) => {
            format.kind.is_video() && format.height() == Some(target)
        }
        _ => false,
    }
}
