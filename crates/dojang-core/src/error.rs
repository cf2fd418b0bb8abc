//! Error types for dojang

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StampError>;

/// Main error type for stamp composition
#[derive(Debug, Error)]
pub enum StampError {
    #[error("Invalid text length: {length} (expected 1 to 9 characters)")]
    InvalidTextLength { length: usize },

    #[error("Invalid font parameter: {0}")]
    InvalidFontParameter(String),

    #[error("Invalid border category: {0}")]
    InvalidCategory(String),

    #[error("Invalid border options: {0}")]
    InvalidBorderOptions(String),

    #[error("No layout registered for text length {length}")]
    MissingLayout { length: usize },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Glyph resolution failed: {0}")]
    Glyph(#[from] GlyphError),
}

/// Failures raised by a glyph source while loading fonts or drawing outlines
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid font data: {0}")]
    InvalidFontData(String),

    #[error("Outline extraction failed for {ch:?} in {font}")]
    OutlineFailed { font: String, ch: char },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for StampError {
    fn from(err: serde_json::Error) -> Self {
        StampError::Config(err.to_string())
    }
}
