//! A loaded font that can draw single characters as SVG paths
//!
//! Fonts keep their raw bytes and create parser views on demand, the same
//! way for TTF, OTF and collection faces.

use std::fs;
use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::MetadataProvider;

use dojang_core::border::escape_attribute;
use dojang_core::traits::{Anchor, GlyphPathOptions, HorizontalAnchor, PathProvider, VerticalAnchor};
use dojang_core::{GlyphError, Result};

use crate::error::{FontLoadError, LoadResult};
use crate::pen::SvgPathPen;

/// Maximum font file size (50MB) to prevent resource exhaustion.
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// A font face brought into memory
pub struct Font {
    id: String,
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    /// Distance from baseline to the top of the em box, font units
    ascender: f32,
    /// Distance from baseline to the bottom of the em box, font units (negative)
    descender: f32,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("id", &self.id)
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(id: impl Into<String>, path: impl AsRef<Path>) -> LoadResult<Self> {
        Self::from_file_index(id, path, 0)
    }

    /// Opens a specific face of a font file (for TTC collections)
    pub fn from_file_index(
        id: impl Into<String>,
        path: impl AsRef<Path>,
        face_index: u32,
    ) -> LoadResult<Self> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FontLoadError::FileNotFound(path.to_path_buf()),
            _ => FontLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        if meta.len() > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                max: MAX_FONT_SIZE,
            });
        }

        let data = fs::read(path).map_err(|e| FontLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Loaded {} bytes of font data from {}", data.len(), path.display());

        Self::from_data_index(id, data, face_index)
    }

    /// Turns raw font bytes into a font
    pub fn from_data(id: impl Into<String>, data: Vec<u8>) -> LoadResult<Self> {
        Self::from_data_index(id, data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(
        id: impl Into<String>,
        data: Vec<u8>,
        face_index: u32,
    ) -> LoadResult<Self> {
        let id = id.into();
        let font_ref = ReadFontRef::from_index(&data, face_index)
            .map_err(|_| FontLoadError::InvalidData(id.clone()))?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let upem = units_per_em as f32;
        let (ascender, descender) = font_ref
            .hhea()
            .map(|hhea| (hhea.ascender().to_i16() as f32, hhea.descender().to_i16() as f32))
            .unwrap_or((upem * 0.8, -upem * 0.2));

        Ok(Font {
            id,
            data,
            face_index,
            units_per_em,
            ascender,
            descender,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Horizontal advance of a glyph in font units
    pub fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                use read_fonts::types::GlyphId;
                let hmtx = font.hmtx().ok()?;
                hmtx.advance(GlyphId::new(glyph_id))
            })
            .map(f32::from)
            .unwrap_or(self.units_per_em as f32 / 2.0)
    }

    /// Draw one glyph with its origin at `(origin_x, baseline)`, sized to
    /// `font_size` pixels per em
    fn outline(&self, glyph_id: u32, font_size: f32, origin_x: f32, baseline: f32) -> Option<String> {
        let font = skrifa::FontRef::from_index(&self.data, self.face_index).ok()?;
        let outlines = font.outline_glyphs();

        // Glyphs without an outline (spaces) draw nothing
        let Some(glyph) = outlines.get(skrifa::GlyphId::new(glyph_id)) else {
            return Some(String::new());
        };
        let mut pen = SvgPathPen::new(origin_x, baseline);
        let settings = DrawSettings::unhinted(Size::new(font_size), LocationRef::default());
        glyph.draw(settings, &mut pen).ok()?;
        Some(pen.finish())
    }
}

/// Glyph box extents in pixels, used to resolve an anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GlyphBox {
    pub advance: f32,
    pub ascender: f32,
    pub descender: f32,
}

/// Where the glyph origin goes so that `anchor` lands on `(x, y)`
///
/// Returns `(origin_x, baseline)`.
pub(crate) fn anchor_origin(anchor: Anchor, x: f32, y: f32, glyph: GlyphBox) -> (f32, f32) {
    let origin_x = match anchor.horizontal {
        HorizontalAnchor::Left => x,
        HorizontalAnchor::Center => x - glyph.advance / 2.0,
        HorizontalAnchor::Right => x - glyph.advance,
    };
    let baseline = match anchor.vertical {
        VerticalAnchor::Baseline => y,
        VerticalAnchor::Top => y + glyph.ascender,
        VerticalAnchor::Middle => y + (glyph.ascender + glyph.descender) / 2.0,
        VerticalAnchor::Bottom => y + glyph.descender,
    };
    (origin_x, baseline)
}

/// Write a `<path>` element with the given attributes and path data
pub(crate) fn path_element(options: &GlyphPathOptions<'_>, d: &str) -> String {
    let attributes: String = options
        .attributes
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, escape_attribute(value)))
        .collect();
    format!(r#"<path{} d="{}"/>"#, attributes, d)
}

impl PathProvider for Font {
    fn glyph_path(&self, ch: char, options: &GlyphPathOptions<'_>) -> Result<String> {
        let glyph_id = self.glyph_id(ch).unwrap_or_else(|| {
            log::warn!("{:?} has no glyph for {:?}, drawing .notdef", self.id, ch);
            0
        });

        let scale = options.font_size / self.units_per_em as f32;
        let glyph = GlyphBox {
            advance: self.advance_width(glyph_id) * scale,
            ascender: self.ascender * scale,
            descender: self.descender * scale,
        };
        let (origin_x, baseline) = anchor_origin(options.anchor, options.x, options.y, glyph);

        let d = self
            .outline(glyph_id, options.font_size, origin_x, baseline)
            .ok_or_else(|| GlyphError::OutlineFailed {
                font: self.id.clone(),
                ch,
            })?;

        Ok(path_element(options, &d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojang_core::types::default_fill;

    const GLYPH: GlyphBox = GlyphBox {
        advance: 20.0,
        ascender: 16.0,
        descender: -4.0,
    };

    #[test]
    fn test_top_left_anchor_moves_baseline_down() {
        assert_eq!(anchor_origin(Anchor::TOP_LEFT, 51.0, 51.0, GLYPH), (51.0, 67.0));
    }

    #[test]
    fn test_other_anchors() {
        let center_middle = Anchor::new(HorizontalAnchor::Center, VerticalAnchor::Middle);
        assert_eq!(anchor_origin(center_middle, 50.0, 50.0, GLYPH), (40.0, 56.0));

        let right_bottom = Anchor::new(HorizontalAnchor::Right, VerticalAnchor::Bottom);
        assert_eq!(anchor_origin(right_bottom, 50.0, 50.0, GLYPH), (30.0, 46.0));

        assert_eq!(anchor_origin(Anchor::default(), 50.0, 50.0, GLYPH), (50.0, 50.0));
    }

    #[test]
    fn test_path_element_writes_attributes_in_order() {
        let mut attributes = default_fill();
        attributes.insert("class".to_string(), r#"a"b"#.to_string());
        let options = GlyphPathOptions {
            x: 0.0,
            y: 0.0,
            font_size: 20.0,
            anchor: Anchor::TOP_LEFT,
            attributes: &attributes,
        };
        assert_eq!(
            path_element(&options, "M0,0Z"),
            r#"<path class="a&quot;b" fill="red" d="M0,0Z"/>"#
        );
    }

    #[test]
    fn test_invalid_data_rejected() {
        let result = Font::from_data("junk", vec![0; 100]);
        assert!(matches!(result, Err(FontLoadError::InvalidData(id)) if id == "junk"));
    }

    #[test]
    fn test_missing_file() {
        let result = Font::from_file("nope", "/definitely/not/here.ttf");
        assert!(matches!(result, Err(FontLoadError::FileNotFound(_))));
    }

    fn test_font() -> Font {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../test-fonts/DejaVuSansMono.ttf");
        Font::from_file("mono", path).expect("load test font")
    }

    /// Horizontal extent of the drawn outline
    fn width(d: &str) -> f32 {
        let xs: Vec<f32> = d
            .split(|c: char| c.is_ascii_alphabetic() || c == ' ')
            .filter_map(|point| point.split(',').next()?.parse().ok())
            .collect();
        let min = xs.iter().copied().fold(f32::MAX, f32::min);
        let max = xs.iter().copied().fold(f32::MIN, f32::max);
        max - min
    }

    #[test]
    fn test_real_font_tables() {
        let font = test_font();
        assert_eq!(font.units_per_em(), 2048);
        assert_eq!(font.face_index(), 0);

        let a = font.glyph_id('A').expect("A is mapped");
        let w = font.glyph_id('W').expect("W is mapped");
        assert_ne!(a, 0);
        // Monospaced: every advance matches
        assert_eq!(font.advance_width(a), font.advance_width(w));
        assert_eq!(font.glyph_id('홍'), None);
    }

    #[test]
    fn test_outline_scales_with_font_size() {
        let font = test_font();
        let glyph_id = font.glyph_id('H').expect("H is mapped");

        let small = font.outline(glyph_id, 20.0, 0.0, 20.0).expect("draw at 20");
        let large = font.outline(glyph_id, 40.0, 0.0, 40.0).expect("draw at 40");
        assert!(small.starts_with('M') && small.ends_with('Z'));
        assert!((width(&large) - 2.0 * width(&small)).abs() < 0.1);
    }

    #[test]
    fn test_glyph_path_element() {
        let font = test_font();
        let fill = default_fill();
        let options = GlyphPathOptions {
            x: 51.0,
            y: 51.0,
            font_size: 20.0,
            anchor: Anchor::TOP_LEFT,
            attributes: &fill,
        };

        let path = font.glyph_path('A', &options).unwrap();
        assert!(path.starts_with(r#"<path fill="red" d="M"#), "{path}");
        assert!(path.ends_with(r#"Z"/>"#), "{path}");

        let space = font.glyph_path(' ', &options).unwrap();
        assert_eq!(space, r#"<path fill="red" d=""/>"#);
    }
}
