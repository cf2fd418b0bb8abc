// this_file: crates/dojang-fontdb/src/pen.rs

//! Outline pen that writes SVG path data in canvas coordinates

use std::fmt::Write as FmtWrite;

/// Collects skrifa outline commands as an SVG `d` attribute
///
/// Outlines arrive in pixels with Y pointing up from the baseline; the pen
/// flips Y and translates everything so the glyph origin lands at
/// `(origin_x, baseline)` on the canvas.
pub(crate) struct SvgPathPen {
    commands: String,
    origin_x: f32,
    baseline: f32,
}

impl SvgPathPen {
    pub(crate) fn new(origin_x: f32, baseline: f32) -> Self {
        Self {
            commands: String::new(),
            origin_x,
            baseline,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.commands
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x, self.baseline - y)
    }
}

impl skrifa::outline::OutlinePen for SvgPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        let _ = write!(&mut self.commands, "M{:.2},{:.2}", x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        let _ = write!(&mut self.commands, "L{:.2},{:.2}", x, y);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (cx, cy) = self.point(cx, cy);
        let (x, y) = self.point(x, y);
        let _ = write!(&mut self.commands, "Q{:.2},{:.2} {:.2},{:.2}", cx, cy, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.point(cx0, cy0);
        let (cx1, cy1) = self.point(cx1, cy1);
        let (x, y) = self.point(x, y);
        let _ = write!(
            &mut self.commands,
            "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cx0, cy0, cx1, cy1, x, y
        );
    }

    fn close(&mut self) {
        self.commands.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::outline::OutlinePen;

    #[test]
    fn test_pen_flips_and_translates() {
        let mut pen = SvgPathPen::new(10.0, 50.0);
        pen.move_to(0.0, 0.0);
        pen.line_to(5.0, 20.0);
        pen.quad_to(6.0, 21.0, 7.5, 22.25);
        pen.curve_to(1.0, 1.0, 2.0, 2.0, 3.0, -4.0);
        pen.close();
        assert_eq!(
            pen.finish(),
            "M10.00,50.00L15.00,30.00Q16.00,29.00 17.50,27.75C11.00,49.00 12.00,48.00 13.00,54.00Z"
        );
    }

    #[test]
    fn test_empty_pen() {
        assert!(SvgPathPen::new(0.0, 0.0).finish().is_empty());
    }
}
