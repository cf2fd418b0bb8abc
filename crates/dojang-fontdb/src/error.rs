//! Font loading errors

use std::path::PathBuf;

use dojang_core::{GlyphError, StampError};
use thiserror::Error;

pub type LoadResult<T> = std::result::Result<T, FontLoadError>;

/// Everything that can go wrong between a font id and a parsed font
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("No font registered or found for id {0:?}")]
    UnknownFont(String),

    #[error("Font file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Font file {} is {size} bytes, limit is {max}", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Invalid font data for {0:?}")]
    InvalidData(String),

    #[error("Failed to read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<FontLoadError> for GlyphError {
    fn from(err: FontLoadError) -> Self {
        match err {
            FontLoadError::UnknownFont(id) => GlyphError::FontNotFound(id),
            FontLoadError::FileNotFound(path) => GlyphError::FontNotFound(path.display().to_string()),
            FontLoadError::InvalidData(_) | FontLoadError::TooLarge { .. } => {
                GlyphError::InvalidFontData(err.to_string())
            },
            FontLoadError::Io { .. } => GlyphError::Other(err.to_string()),
        }
    }
}

impl From<FontLoadError> for StampError {
    fn from(err: FontLoadError) -> Self {
        StampError::Glyph(err.into())
    }
}
