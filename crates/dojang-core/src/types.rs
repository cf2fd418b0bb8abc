//! The data structures that carry a request through composition

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StampError};

/// Shortest text a stamp can carry
pub const MIN_TEXT_LEN: usize = 1;

/// Longest text a stamp can carry
pub const MAX_TEXT_LEN: usize = 9;

/// SVG presentation attributes applied to every glyph path, kept in key order
pub type FillAttributes = BTreeMap<String, String>;

/// `{fill: red}`, the attributes used when a request names none
pub fn default_fill() -> FillAttributes {
    let mut attributes = FillAttributes::new();
    attributes.insert("fill".to_string(), "red".to_string());
    attributes
}

/// Border shape family selected per layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    /// Circle or ellipse, depending on character count parity
    Round,
    /// Rectangle sized to the glyph grid
    Rect,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Round => "round",
            Category::Rect => "rect",
        }
    }
}

impl FromStr for Category {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" | "circle" => Ok(Category::Round),
            "rect" | "rectangle" | "square" => Ok(Category::Rect),
            _ => Err(StampError::InvalidCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = StampError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stamp face: a border family, a grid, and the characters it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    pub category: Category,
    pub columns: u32,
    pub rows: u32,
    pub word: String,
}

impl LayoutDescriptor {
    pub fn new(category: Category, columns: u32, rows: u32, word: impl Into<String>) -> Self {
        Self {
            category,
            columns,
            rows,
            word: word.into(),
        }
    }

    /// Number of glyph cells in the grid
    pub fn cells(&self) -> usize {
        (self.columns as usize).saturating_mul(self.rows as usize)
    }

    /// Number of characters in `word`
    pub fn char_count(&self) -> usize {
        self.word.chars().count()
    }
}

/// Where a single character lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub character: char,
    /// Left edge of the glyph cell
    pub x: f32,
    /// Top edge of the glyph cell
    pub y: f32,
    pub cell_size: f32,
}

/// Stroke color and width for a border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub stroke: String,
    pub stroke_width: f32,
}

impl StrokeStyle {
    pub fn new(stroke: impl Into<String>, stroke_width: f32) -> Self {
        Self {
            stroke: stroke.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new("#ff0000", 2.3)
    }
}

/// Caller-supplied border override
///
/// Both fields must be given together; a request naming only one of them is
/// rejected rather than silently completed from the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderOptions {
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f32>,
}

impl BorderOptions {
    pub fn new(stroke: impl Into<String>, stroke_width: f32) -> Self {
        Self {
            stroke: Some(stroke.into()),
            stroke_width: Some(stroke_width),
        }
    }

    /// Turn the override into a concrete style, falling back to `default`
    /// only when both fields are absent
    pub fn resolve(&self, default: &StrokeStyle) -> Result<StrokeStyle> {
        match (&self.stroke, self.stroke_width) {
            (Some(stroke), Some(width)) => {
                if stroke.trim().is_empty() {
                    return Err(StampError::InvalidBorderOptions(
                        "stroke must not be empty".to_string(),
                    ));
                }
                if !width.is_finite() || width < 0.0 {
                    return Err(StampError::InvalidBorderOptions(format!(
                        "stroke width must be a non-negative number, got {width}"
                    )));
                }
                Ok(StrokeStyle::new(stroke.clone(), width))
            },
            (None, None) => Ok(default.clone()),
            (Some(_), None) => Err(StampError::InvalidBorderOptions(
                "strokeWidth is required when stroke is given".to_string(),
            )),
            (None, Some(_)) => Err(StampError::InvalidBorderOptions(
                "stroke is required when strokeWidth is given".to_string(),
            )),
        }
    }
}

/// Which fonts a request should be rendered in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FontSelector {
    /// Every font in the configured default set
    #[default]
    Default,
    /// Exactly one font
    Single(String),
    /// These fonts, in this order
    List(Vec<String>),
}

impl FontSelector {
    /// Interpret a loosely-typed selector: null, a string, or a list of strings
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(FontSelector::Default),
            Value::String(id) => Ok(FontSelector::Single(id.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(id) => Ok(id.clone()),
                    other => Err(StampError::InvalidFontParameter(format!(
                        "font list entries must be strings, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(FontSelector::List),
            other => Err(StampError::InvalidFontParameter(format!(
                "expected a font id or a list of font ids, got {other}"
            ))),
        }
    }

    /// Reject identifiers that could never name a font
    pub fn validate(&self) -> Result<()> {
        let blank = match self {
            FontSelector::Default => false,
            FontSelector::Single(id) => id.trim().is_empty(),
            FontSelector::List(ids) => ids.iter().any(|id| id.trim().is_empty()),
        };
        if blank {
            return Err(StampError::InvalidFontParameter(
                "font ids must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The ordered font list this selector stands for
    pub fn effective<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        match self {
            FontSelector::Default => defaults,
            FontSelector::Single(id) => std::slice::from_ref(id),
            FontSelector::List(ids) => ids,
        }
    }
}

/// Everything needed to compose one set of stamps
#[derive(Debug, Clone, PartialEq)]
pub struct StampRequest {
    pub text: String,
    pub fonts: FontSelector,
    pub fill: FillAttributes,
    pub border: Option<BorderOptions>,
}

/// Wire shape of a request before the font selector is interpreted
#[derive(Deserialize)]
struct RawStampRequest {
    text: String,
    #[serde(default)]
    font: Value,
    #[serde(default = "default_fill")]
    attributes: FillAttributes,
    #[serde(default, rename = "borderOption")]
    border_option: Option<BorderOptions>,
}

impl StampRequest {
    /// A request for `text` in the default fonts, red fill, default border
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fonts: FontSelector::Default,
            fill: default_fill(),
            border: None,
        }
    }

    /// Parse a request from JSON (`text`, `font`, `attributes`, `borderOption`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawStampRequest = serde_json::from_str(json)?;
        Ok(Self {
            text: raw.text,
            fonts: FontSelector::from_value(&raw.font)?,
            fill: raw.attributes,
            border: raw.border_option,
        })
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.fonts = FontSelector::Single(font.into());
        self
    }

    pub fn with_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fonts = FontSelector::List(fonts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fill(mut self, fill: FillAttributes) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_fill_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fill.insert(key.into(), value.into());
        self
    }

    pub fn with_border(mut self, stroke: impl Into<String>, stroke_width: f32) -> Self {
        self.border = Some(BorderOptions::new(stroke, stroke_width));
        self
    }

    pub fn with_border_options(mut self, options: BorderOptions) -> Self {
        self.border = Some(options);
        self
    }

    /// Length in characters, which is what the layout table is keyed by
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One finished stamp: self-contained SVG markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStamp {
    markup: String,
    font: String,
    layout_index: usize,
}

impl RenderedStamp {
    pub(crate) fn new(markup: String, font: String, layout_index: usize) -> Self {
        Self {
            markup,
            font,
            layout_index,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Font this variant was rendered in
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Position of the layout descriptor this stamp was built from
    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl AsRef<str> for RenderedStamp {
    fn as_ref(&self) -> &str {
        &self.markup
    }
}

impl fmt::Display for RenderedStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_parsing() {
        assert_eq!("round".parse::<Category>().unwrap(), Category::Round);
        assert_eq!("CIRCLE".parse::<Category>().unwrap(), Category::Round);
        assert_eq!(" Rect ".parse::<Category>().unwrap(), Category::Rect);
        assert!(matches!(
            "hexagon".parse::<Category>(),
            Err(StampError::InvalidCategory(name)) if name == "hexagon"
        ));
    }

    #[test]
    fn test_font_selector_from_value() {
        assert_eq!(FontSelector::from_value(&Value::Null).unwrap(), FontSelector::Default);
        assert_eq!(
            FontSelector::from_value(&json!("myeongjo")).unwrap(),
            FontSelector::Single("myeongjo".into())
        );
        assert_eq!(
            FontSelector::from_value(&json!(["a", "b"])).unwrap(),
            FontSelector::List(vec!["a".into(), "b".into()])
        );
        assert!(matches!(
            FontSelector::from_value(&json!({})),
            Err(StampError::InvalidFontParameter(_))
        ));
        assert!(matches!(
            FontSelector::from_value(&json!(["a", 3])),
            Err(StampError::InvalidFontParameter(_))
        ));
        assert!(matches!(
            FontSelector::from_value(&json!(12)),
            Err(StampError::InvalidFontParameter(_))
        ));
    }

    #[test]
    fn test_font_selector_effective() {
        let defaults = vec!["one".to_string(), "two".to_string()];
        assert_eq!(FontSelector::Default.effective(&defaults), &defaults[..]);
        assert_eq!(
            FontSelector::Single("x".into()).effective(&defaults),
            &["x".to_string()][..]
        );
        assert!(FontSelector::List(vec![]).effective(&defaults).is_empty());
    }

    #[test]
    fn test_blank_font_id_rejected() {
        assert!(FontSelector::Single("  ".into()).validate().is_err());
        assert!(FontSelector::List(vec!["ok".into(), String::new()]).validate().is_err());
        assert!(FontSelector::Default.validate().is_ok());
    }

    #[test]
    fn test_border_options_both_or_neither() {
        let default = StrokeStyle::default();
        assert_eq!(BorderOptions::default().resolve(&default).unwrap(), default);
        assert_eq!(
            BorderOptions::new("#000", 1.5).resolve(&default).unwrap(),
            StrokeStyle::new("#000", 1.5)
        );

        let stroke_only = BorderOptions {
            stroke: Some("#000".into()),
            stroke_width: None,
        };
        assert!(matches!(
            stroke_only.resolve(&default),
            Err(StampError::InvalidBorderOptions(_))
        ));

        let width_only = BorderOptions {
            stroke: None,
            stroke_width: Some(1.0),
        };
        assert!(matches!(
            width_only.resolve(&default),
            Err(StampError::InvalidBorderOptions(_))
        ));
    }

    #[test]
    fn test_request_from_json() {
        let request = StampRequest::from_json_str(
            r##"{"text": "홍길동", "font": ["a", "b"], "borderOption": {"stroke": "#000", "strokeWidth": 1}}"##,
        )
        .unwrap();
        assert_eq!(request.text_len(), 3);
        assert_eq!(request.fonts, FontSelector::List(vec!["a".into(), "b".into()]));
        assert_eq!(request.fill, default_fill());
        assert_eq!(request.border, Some(BorderOptions::new("#000", 1.0)));
    }

    #[test]
    fn test_request_from_json_rejects_object_font() {
        let result = StampRequest::from_json_str(r#"{"text": "A", "font": {}}"#);
        assert!(matches!(result, Err(StampError::InvalidFontParameter(_))));
    }

    #[test]
    fn test_request_builders() {
        let request = StampRequest::new("AB")
            .with_fonts(["x", "y"])
            .with_fill_attribute("fill-opacity", "0.8")
            .with_border("#123456", 3.0);
        assert_eq!(request.fill.get("fill").map(String::as_str), Some("red"));
        assert_eq!(request.fill.get("fill-opacity").map(String::as_str), Some("0.8"));
        assert_eq!(request.border, Some(BorderOptions::new("#123456", 3.0)));
    }
}
