//! Canvas geometry and rendering defaults
//!
//! Everything that is a fixed constant of the stamp layout lives here rather
//! than in the algorithms: canvas size, glyph cell size, border metrics, the
//! default stroke, the default font set and the SVG envelope.
//!
//! A [`StampConfig`] can be built in code, loaded from a partial JSON
//! document (missing fields keep their defaults), and overlaid with the
//! `DOJANG_DEFAULT_FONTS` environment variable:
//!
//! ```bash
//! DOJANG_DEFAULT_FONTS=nanum-myeongjo,nanum-gothic ./my_app
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, StampError};
use crate::types::StrokeStyle;

/// Environment variable holding a comma-separated default font list
pub const DEFAULT_FONTS_ENV: &str = "DOJANG_DEFAULT_FONTS";

/// Fonts used when a request does not name any
pub const DEFAULT_FONTS: [&str; 3] = ["nanum-myeongjo", "nanum-gothic", "nanum-brush"];

/// Fixed layout constants for every stamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StampConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Edge length of one glyph cell, also the glyph font size
    pub cell_size: f32,
    /// Extra space added around the glyph grid when sizing a border
    pub border_margin: f32,
    /// Radius of the circle drawn for even-length round stamps
    pub circle_radius: f32,
    /// Vertical radius of the ellipse grows by this much per character
    pub ellipse_step: f32,
    pub default_stroke: StrokeStyle,
    pub default_fonts: Vec<String>,
    /// Opening tag of each stamp; generated from the canvas size when unset
    pub envelope_open: Option<String>,
    pub envelope_close: String,
}

impl StampConfig {
    /// Load a config from JSON, keeping defaults for anything not mentioned
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DOJANG_DEFAULT_FONTS` when it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(DEFAULT_FONTS_ENV) {
            Ok(value) => self.with_default_fonts_list(&value),
            Err(_) => self,
        }
    }

    fn with_default_fonts_list(mut self, value: &str) -> Self {
        let fonts: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        if !fonts.is_empty() {
            log::info!("Default fonts overridden via {}: {:?}", DEFAULT_FONTS_ENV, fonts);
            self.default_fonts = fonts;
        }
        self
    }

    pub fn with_default_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Horizontal center of the canvas
    pub fn center_x(&self) -> f32 {
        self.canvas_width / 2.0
    }

    /// Vertical center of the canvas
    pub fn center_y(&self) -> f32 {
        self.canvas_height / 2.0
    }

    /// The tag that opens every stamp
    pub fn open_tag(&self) -> String {
        match &self.envelope_open {
            Some(tag) => tag.clone(),
            None => format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                w = self.canvas_width,
                h = self.canvas_height
            ),
        }
    }

    /// Reject geometry no stamp could be drawn on
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
            ("cellSize", self.cell_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(StampError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("borderMargin", self.border_margin),
            ("circleRadius", self.circle_radius),
            ("ellipseStep", self.ellipse_step),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(StampError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            canvas_width: 122.0,
            canvas_height: 122.0,
            cell_size: 20.0,
            border_margin: 10.0,
            circle_radius: 30.0,
            ellipse_step: 10.0,
            default_stroke: StrokeStyle::default(),
            default_fonts: DEFAULT_FONTS.iter().map(|id| id.to_string()).collect(),
            envelope_open: None,
            envelope_close: "</svg>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StampConfig::default();
        assert_eq!(config.center_x(), 61.0);
        assert_eq!(config.center_y(), 61.0);
        assert_eq!(config.default_stroke, StrokeStyle::new("#ff0000", 2.3));
        assert_eq!(config.default_fonts.len(), DEFAULT_FONTS.len());
        assert!(config.validate().is_ok());
        assert_eq!(
            config.open_tag(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="122" height="122" viewBox="0 0 122 122">"#
        );
    }

    #[test]
    fn test_custom_envelope() {
        let config = StampConfig::from_json_str(r#"{"envelopeOpen": "<svg>"}"#).unwrap();
        assert_eq!(config.open_tag(), "<svg>");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            StampConfig::from_json_str(r#"{"cellSize": 24, "defaultFonts": ["solo"]}"#).unwrap();
        assert_eq!(config.cell_size, 24.0);
        assert_eq!(config.default_fonts, vec!["solo".to_string()]);
        assert_eq!(config.canvas_width, 122.0);
        assert_eq!(config.envelope_close, "</svg>");
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(matches!(
            StampConfig::from_json_str(r#"{"cellSize": 0}"#),
            Err(StampError::Config(_))
        ));
        assert!(matches!(
            StampConfig::from_json_str(r#"{"borderMargin": -1}"#),
            Err(StampError::Config(_))
        ));
        assert!(matches!(
            StampConfig::from_json_str("not json"),
            Err(StampError::Config(_))
        ));
    }

    #[test]
    fn test_default_fonts_list_parsing() {
        let config = StampConfig::default().with_default_fonts_list(" a , ,b ");
        assert_eq!(config.default_fonts, vec!["a".to_string(), "b".to_string()]);

        let untouched = StampConfig::default().with_default_fonts_list(" , ");
        assert_eq!(untouched.default_fonts.len(), DEFAULT_FONTS.len());
    }
}
