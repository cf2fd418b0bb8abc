//! Fonts for stamps: loading, lookup and glyph outlines
//!
//! [`FontDatabase`] is the [`GlyphSource`](dojang_core::GlyphSource) that
//! backs a [`StampComposer`](dojang_core::StampComposer) with real font
//! files. Each resolved [`Font`] draws characters as SVG `<path>` elements
//! using outlines from skrifa.
//!
//! ```rust,no_run
//! use dojang_core::{StampComposer, StampRequest};
//! use dojang_fontdb::FontDatabase;
//!
//! let fonts = FontDatabase::new().with_search_dir("/usr/share/fonts/truetype/nanum");
//! let composer = StampComposer::new(fonts);
//! let request = StampRequest::new("홍길동").with_font("NanumMyeongjo");
//! for stamp in pollster::block_on(composer.compose(&request))? {
//!     println!("{}", stamp.markup());
//! }
//! # Ok::<(), dojang_core::StampError>(())
//! ```

pub mod database;
pub mod error;
pub mod font;
mod pen;

pub use database::{CacheStats, FontDatabase, FONT_EXTENSIONS};
pub use error::{FontLoadError, LoadResult};
pub use font::{Font, MAX_FONT_SIZE};
