//! Dojang Core: from a name to a set of seal stamps
//!
//! A stamp is a fixed-size SVG canvas holding a border and a grid of glyph
//! paths. This crate owns the composition engine; fonts and layout data are
//! injected.
//!
//! ## The Journey
//!
//! 1. **Layout** - The text length picks one or more faces from a [`LayoutLookup`]
//! 2. **Placement** - Each face lays its characters into a centered grid ([`grid`])
//! 3. **Glyphs** - A [`GlyphSource`] resolves each font and draws each character
//! 4. **Border** - A circle, ellipse or rectangle frames the grid ([`border`])
//! 5. **Assembly** - Border and paths are wrapped in the canvas envelope
//!
//! ## Compose Your First Stamp
//!
//! ```rust
//! use dojang_core::{
//!     traits::{GlyphPathOptions, GlyphSource, PathProvider},
//!     Result, StampComposer, StampRequest,
//! };
//!
//! struct Boxes;
//!
//! impl PathProvider for Boxes {
//!     fn glyph_path(&self, _ch: char, o: &GlyphPathOptions<'_>) -> Result<String> {
//!         Ok(format!(r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#, o.x, o.y, o.font_size, o.font_size))
//!     }
//! }
//!
//! struct BoxFonts;
//!
//! impl GlyphSource for BoxFonts {
//!     type Provider = Boxes;
//!
//!     async fn resolve(&self, _font_id: &str) -> Result<Boxes> {
//!         Ok(Boxes)
//!     }
//! }
//!
//! let composer = StampComposer::new(BoxFonts);
//! let request = StampRequest::new("홍길동").with_font("box");
//! let stamps = futures::executor::block_on(composer.compose(&request))?;
//!
//! assert_eq!(stamps.len(), 1);
//! assert!(stamps[0].markup().contains("<ellipse"));
//! # Ok::<(), dojang_core::StampError>(())
//! ```

pub mod border;
pub mod compose;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod traits;
pub mod types;

pub use border::BorderShape;
pub use compose::StampComposer;
pub use config::StampConfig;
pub use error::{GlyphError, Result, StampError};
pub use layout::{LayoutRule, LayoutTable};
pub use traits::{GlyphSource, LayoutLookup, PathProvider};
pub use types::{
    BorderOptions, Category, FillAttributes, FontSelector, GlyphPlacement, LayoutDescriptor,
    RenderedStamp, StampRequest, StrokeStyle,
};
