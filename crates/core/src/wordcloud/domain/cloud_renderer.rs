use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::domain::noun_frequency::WordFrequency;

use super::circular_mask::CircularMask;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font data is not a valid TrueType/OpenType font")]
    InvalidFont,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write image to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered, PNG-encoded word cloud.
#[derive(Clone, Debug)]
pub struct WordCloudImage {
    pub png: Vec<u8>,
    /// On-disk copy, when the caller asked for one.
    pub path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// Number of words that fit inside the mask.
    pub word_count: usize,
}

/// Domain interface for rendering one speaker's word cloud.
///
/// Failures are returned per call so a batch can carry on with the next
/// speaker.
pub trait CloudRenderer: Send {
    fn render(
        &self,
        frequencies: &WordFrequency,
        mask: &CircularMask,
        speaker_label: &str,
        output_path: Option<&Path>,
    ) -> Result<WordCloudImage, RenderError>;
}
