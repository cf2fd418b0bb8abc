//! The seams where collaborators plug into the composer
//!
//! - [`GlyphSource`] - Turns a font identifier into something that can draw glyphs
//! - [`PathProvider`] - Draws one character as SVG path markup
//! - [`LayoutLookup`] - Splits a text into stamp faces

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, StampError};
use crate::types::{FillAttributes, LayoutDescriptor};

/// Horizontal reference point of a glyph box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical reference point of a glyph box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    #[default]
    Baseline,
    Top,
    Middle,
    Bottom,
}

/// Which point of the glyph box the requested `(x, y)` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl Anchor {
    /// `(x, y)` is the top-left corner of the glyph box; used for every stamp
    pub const TOP_LEFT: Anchor = Anchor {
        horizontal: HorizontalAnchor::Left,
        vertical: VerticalAnchor::Top,
    };

    pub const fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl FromStr for Anchor {
    type Err = StampError;

    /// Parses space-separated keywords in any order, e.g. `"top left"` or `"center middle"`
    fn from_str(s: &str) -> Result<Self> {
        let mut anchor = Anchor::default();
        for word in s.split_whitespace() {
            match word.to_ascii_lowercase().as_str() {
                "left" => anchor.horizontal = HorizontalAnchor::Left,
                "center" => anchor.horizontal = HorizontalAnchor::Center,
                "right" => anchor.horizontal = HorizontalAnchor::Right,
                "baseline" => anchor.vertical = VerticalAnchor::Baseline,
                "top" => anchor.vertical = VerticalAnchor::Top,
                "middle" => anchor.vertical = VerticalAnchor::Middle,
                "bottom" => anchor.vertical = VerticalAnchor::Bottom,
                other => {
                    return Err(StampError::Config(format!("unknown anchor keyword: {other}")))
                },
            }
        }
        Ok(anchor)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertical = match self.vertical {
            VerticalAnchor::Baseline => "baseline",
            VerticalAnchor::Top => "top",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Bottom => "bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalAnchor::Left => "left",
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
        };
        write!(f, "{vertical} {horizontal}")
    }
}

/// How and where a single glyph should be drawn
#[derive(Debug, Clone, Copy)]
pub struct GlyphPathOptions<'a> {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub anchor: Anchor,
    /// Presentation attributes written onto the path element
    pub attributes: &'a FillAttributes,
}

/// Draws characters of one loaded font
pub trait PathProvider: Send + Sync {
    /// Render `ch` as a complete SVG `<path>` element
    fn glyph_path(&self, ch: char, options: &GlyphPathOptions<'_>) -> Result<String>;
}

impl<P: PathProvider + ?Sized> PathProvider for Arc<P> {
    fn glyph_path(&self, ch: char, options: &GlyphPathOptions<'_>) -> Result<String> {
        (**self).glyph_path(ch, options)
    }
}

/// Resolves font identifiers, possibly loading font files along the way
///
/// Resolution is asynchronous so that implementations are free to perform I/O.
///
/// ```ignore
/// struct MySource;
///
/// impl GlyphSource for MySource {
///     type Provider = MyFont;
///
///     async fn resolve(&self, font_id: &str) -> Result<MyFont> {
///         MyFont::load(font_id).await
///     }
/// }
/// ```
pub trait GlyphSource: Send + Sync {
    type Provider: PathProvider;

    fn resolve(&self, font_id: &str) -> impl Future<Output = Result<Self::Provider>> + Send;
}

/// Supplies the stamp faces for a text, keyed by its length
pub trait LayoutLookup: Send + Sync {
    /// Ordered descriptors for `text`; [`StampError::MissingLayout`] when the
    /// length has no entry
    fn layouts(&self, text: &str) -> Result<Vec<LayoutDescriptor>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_parsing() {
        assert_eq!("top left".parse::<Anchor>().unwrap(), Anchor::TOP_LEFT);
        assert_eq!("LEFT TOP".parse::<Anchor>().unwrap(), Anchor::TOP_LEFT);
        assert_eq!(
            "center middle".parse::<Anchor>().unwrap(),
            Anchor::new(HorizontalAnchor::Center, VerticalAnchor::Middle)
        );
        assert_eq!("".parse::<Anchor>().unwrap(), Anchor::default());
        assert!("upper left".parse::<Anchor>().is_err());
    }

    #[test]
    fn test_anchor_display_round_trips() {
        let anchor = Anchor::new(HorizontalAnchor::Right, VerticalAnchor::Bottom);
        assert_eq!(anchor.to_string(), "bottom right");
        assert_eq!(anchor.to_string().parse::<Anchor>().unwrap(), anchor);
    }
}
