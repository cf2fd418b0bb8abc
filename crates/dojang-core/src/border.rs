//! Border geometry: the circle, ellipse or rectangle framing a stamp
//!
//! Round stamps holding an even number of characters get a true circle;
//! odd counts get an ellipse whose height grows with the count. Rectangular
//! stamps get a rectangle sized to the glyph grid. Every shape is centered on
//! the canvas.

use std::fmt;

use crate::config::StampConfig;
use crate::types::{Category, StrokeStyle};

/// A border primitive, ready to be written as SVG
#[derive(Debug, Clone, PartialEq)]
pub enum BorderShape {
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        stroke: StrokeStyle,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        stroke: StrokeStyle,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke: StrokeStyle,
    },
}

impl BorderShape {
    pub fn stroke(&self) -> &StrokeStyle {
        match self {
            BorderShape::Circle { stroke, .. }
            | BorderShape::Ellipse { stroke, .. }
            | BorderShape::Rect { stroke, .. } => stroke,
        }
    }

    /// The SVG element for this border, unfilled
    pub fn to_markup(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BorderShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stroke = self.stroke();
        let paint = format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            escape_attribute(&stroke.stroke),
            stroke.stroke_width
        );
        match self {
            BorderShape::Circle { cx, cy, r, .. } => {
                write!(f, r#"<circle {paint} cx="{cx}" cy="{cy}" r="{r}"></circle>"#)
            },
            BorderShape::Ellipse { cx, cy, rx, ry, .. } => write!(
                f,
                r#"<ellipse {paint} cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}"></ellipse>"#
            ),
            BorderShape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => write!(
                f,
                r#"<rect {paint} x="{x}" y="{y}" width="{width}" height="{height}"></rect>"#
            ),
        }
    }
}

/// Pick and size the border for one stamp face
///
/// `char_count` decides circle versus ellipse for round stamps; `height` and
/// `width` only matter for rectangles.
pub fn resolve(
    category: Category,
    char_count: usize,
    height: f32,
    width: f32,
    stroke: StrokeStyle,
    config: &StampConfig,
) -> BorderShape {
    let cx = config.center_x();
    let cy = config.center_y();
    match category {
        Category::Round if char_count % 2 == 0 => BorderShape::Circle {
            cx,
            cy,
            r: config.circle_radius,
            stroke,
        },
        Category::Round => BorderShape::Ellipse {
            cx,
            cy,
            rx: config.cell_size,
            ry: (char_count as f32 + 1.0) * config.ellipse_step,
            stroke,
        },
        Category::Rect => BorderShape::Rect {
            x: (config.canvas_width - width) / 2.0,
            y: (config.canvas_height - height) / 2.0,
            width,
            height,
            stroke,
        },
    }
}

/// Escape text for use inside a double-quoted XML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StampConfig {
        StampConfig::default()
    }

    #[test]
    fn test_round_even_is_circle() {
        for count in [0, 2, 4, 8] {
            let shape = resolve(Category::Round, count, 50.0, 30.0, StrokeStyle::default(), &config());
            assert_eq!(
                shape,
                BorderShape::Circle {
                    cx: 61.0,
                    cy: 61.0,
                    r: 30.0,
                    stroke: StrokeStyle::default(),
                }
            );
        }
    }

    #[test]
    fn test_round_odd_is_ellipse() {
        let shape = resolve(Category::Round, 3, 70.0, 30.0, StrokeStyle::default(), &config());
        assert_eq!(
            shape,
            BorderShape::Ellipse {
                cx: 61.0,
                cy: 61.0,
                rx: 20.0,
                ry: 40.0,
                stroke: StrokeStyle::default(),
            }
        );

        match resolve(Category::Round, 1, 30.0, 30.0, StrokeStyle::default(), &config()) {
            BorderShape::Ellipse { ry, .. } => assert_eq!(ry, 20.0),
            other => panic!("expected ellipse, got {other:?}"),
        }
    }

    #[test]
    fn test_rect_is_centered() {
        let config = config();
        for (height, width) in [(50.0, 50.0), (50.0, 70.0), (70.0, 70.0), (31.0, 47.0)] {
            match resolve(Category::Rect, 4, height, width, StrokeStyle::default(), &config) {
                BorderShape::Rect {
                    x,
                    y,
                    width: w,
                    height: h,
                    ..
                } => {
                    assert_eq!(w, width);
                    assert_eq!(h, height);
                    assert_eq!(x + w / 2.0, config.canvas_width / 2.0);
                    assert_eq!(y + h / 2.0, config.canvas_height / 2.0);
                },
                other => panic!("expected rect, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_markup() {
        let circle = resolve(Category::Round, 2, 0.0, 0.0, StrokeStyle::default(), &config());
        assert_eq!(
            circle.to_markup(),
            r##"<circle fill="none" stroke="#ff0000" stroke-width="2.3" cx="61" cy="61" r="30"></circle>"##
        );

        let rect = resolve(Category::Rect, 4, 50.0, 70.0, StrokeStyle::new("#000", 1.0), &config());
        assert_eq!(
            rect.to_markup(),
            r##"<rect fill="none" stroke="#000" stroke-width="1" x="26" y="36" width="70" height="50"></rect>"##
        );
    }

    #[test]
    fn test_stroke_is_escaped() {
        let shape = resolve(
            Category::Round,
            2,
            0.0,
            0.0,
            StrokeStyle::new(r#"red" onload="x"#, 1.0),
            &config(),
        );
        assert!(shape.to_markup().contains(r#"stroke="red&quot; onload=&quot;x""#));
    }
}
