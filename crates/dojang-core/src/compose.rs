//! The stamp composer: one request in, a list of SVG stamps out
//!
//! For every layout face of the text and every selected font, the composer
//! places the glyphs, asks the font for their paths, sizes a border, and
//! wraps the lot in the canvas envelope. Results come back face-major,
//! font-minor: all variants of face 0 first, then face 1, and so on.

use futures::future::try_join_all;

use crate::border::{self, BorderShape};
use crate::config::StampConfig;
use crate::error::{Result, StampError};
use crate::grid;
use crate::layout::LayoutTable;
use crate::traits::{Anchor, GlyphPathOptions, GlyphSource, LayoutLookup, PathProvider};
use crate::types::{
    FillAttributes, LayoutDescriptor, RenderedStamp, StampRequest, StrokeStyle, MAX_TEXT_LEN,
    MIN_TEXT_LEN,
};

/// Everything a request resolves to before any font is touched
#[derive(Debug, Clone)]
struct StampPlan {
    layouts: Vec<LayoutDescriptor>,
    fonts: Vec<String>,
    fill: FillAttributes,
    stroke: StrokeStyle,
}

impl StampPlan {
    /// `(layout index, layout, font)` in output order
    fn jobs(&self) -> impl Iterator<Item = (usize, &LayoutDescriptor, &str)> + '_ {
        self.layouts.iter().enumerate().flat_map(move |(index, layout)| {
            self.fonts
                .iter()
                .map(move |font| (index, layout, font.as_str()))
        })
    }

    fn len(&self) -> usize {
        self.layouts.len() * self.fonts.len()
    }
}

/// Composes stamps from a glyph source and a layout lookup
///
/// ```ignore
/// let composer = StampComposer::new(font_db);
/// let stamps = pollster::block_on(composer.compose(&StampRequest::new("홍길동")))?;
/// for stamp in &stamps {
///     println!("{}: {}", stamp.font(), stamp.markup());
/// }
/// ```
#[derive(Debug)]
pub struct StampComposer<S, L = LayoutTable> {
    source: S,
    layouts: L,
    config: StampConfig,
}

impl<S: GlyphSource> StampComposer<S, LayoutTable> {
    /// A composer using the standard layout table and default config
    pub fn new(source: S) -> Self {
        Self::with_layouts(source, LayoutTable::standard())
    }
}

impl<S: GlyphSource, L: LayoutLookup> StampComposer<S, L> {
    pub fn with_layouts(source: S, layouts: L) -> Self {
        Self {
            source,
            layouts,
            config: StampConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StampConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Render every face of the request in every selected font, one at a time
    ///
    /// Fails on the first error without returning partial results.
    pub async fn compose(&self, request: &StampRequest) -> Result<Vec<RenderedStamp>> {
        let plan = self.plan(request)?;
        log::debug!(
            "Composing {} stamp(s) for {:?}: {} face(s) x {} font(s)",
            plan.len(),
            request.text,
            plan.layouts.len(),
            plan.fonts.len()
        );

        let mut stamps = Vec::with_capacity(plan.len());
        for (index, layout, font) in plan.jobs() {
            stamps.push(self.render(index, layout, font, &plan).await?);
        }
        Ok(stamps)
    }

    /// Same output as [`compose`](Self::compose), but every
    /// `(face, font)` pair is resolved concurrently on the calling task
    pub async fn compose_concurrent(&self, request: &StampRequest) -> Result<Vec<RenderedStamp>> {
        let plan = self.plan(request)?;
        log::debug!(
            "Composing {} stamp(s) concurrently for {:?}",
            plan.len(),
            request.text
        );

        try_join_all(
            plan.jobs()
                .map(|(index, layout, font)| self.render(index, layout, font, &plan)),
        )
        .await
    }

    /// Validate the request and work out every face and font up front
    fn plan(&self, request: &StampRequest) -> Result<StampPlan> {
        self.config.validate()?;

        let length = request.text_len();
        if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&length) {
            return Err(StampError::InvalidTextLength { length });
        }
        request.fonts.validate()?;

        let stroke = match &request.border {
            Some(options) => options.resolve(&self.config.default_stroke)?,
            None => self.config.default_stroke.clone(),
        };

        let layouts = self.layouts.layouts(&request.text)?;
        check_layouts(&request.text, &layouts, &self.config)?;

        let fonts = request
            .fonts
            .effective(&self.config.default_fonts)
            .to_vec();

        Ok(StampPlan {
            layouts,
            fonts,
            fill: request.fill.clone(),
            stroke,
        })
    }

    /// Build one stamp for one face in one font
    async fn render(
        &self,
        index: usize,
        layout: &LayoutDescriptor,
        font: &str,
        plan: &StampPlan,
    ) -> Result<RenderedStamp> {
        let provider = self.source.resolve(font).await?;

        let cell = self.config.cell_size;
        let placements = grid::place(&layout.word, layout.columns, layout.rows, &self.config);
        let paths = placements
            .iter()
            .map(|placement| {
                let options = GlyphPathOptions {
                    x: placement.x,
                    y: placement.y,
                    font_size: placement.cell_size,
                    anchor: Anchor::TOP_LEFT,
                    attributes: &plan.fill,
                };
                provider.glyph_path(placement.character, &options)
            })
            .collect::<Result<Vec<_>>>()?;

        let margin = self.config.border_margin;
        let border = border::resolve(
            layout.category,
            layout.char_count(),
            layout.rows as f32 * cell + margin,
            layout.columns as f32 * cell + margin,
            plan.stroke.clone(),
            &self.config,
        );

        log::debug!(
            "Rendered face {} ({} {}x{}, {:?}) in {}",
            index,
            layout.category,
            layout.columns,
            layout.rows,
            layout.word,
            font
        );

        Ok(RenderedStamp::new(
            self.assemble(&border, &paths),
            font.to_string(),
            index,
        ))
    }

    /// Wrap the border and glyph paths in the canvas envelope
    fn assemble(&self, border: &BorderShape, paths: &[String]) -> String {
        let mut markup = format!("{}\n  {}\n", self.config.open_tag(), border);
        for path in paths {
            markup.push_str("  ");
            markup.push_str(path);
            markup.push('\n');
        }
        markup.push_str(&self.config.envelope_close);
        markup
    }
}

/// Descriptors must fit their grids, their grids must fit the canvas, and
/// together they consume the text exactly, in order
fn check_layouts(text: &str, layouts: &[LayoutDescriptor], config: &StampConfig) -> Result<()> {
    if layouts.is_empty() {
        return Err(StampError::InvalidLayout(format!("no faces for {text:?}")));
    }
    for layout in layouts {
        if layout.columns == 0 || layout.rows == 0 {
            return Err(StampError::InvalidLayout(format!(
                "face {:?} has an empty {}x{} grid",
                layout.word, layout.columns, layout.rows
            )));
        }
        let width = layout.columns as f32 * config.cell_size;
        let height = layout.rows as f32 * config.cell_size;
        if width > config.canvas_width || height > config.canvas_height {
            return Err(StampError::InvalidLayout(format!(
                "face {:?} needs {}x{} but the canvas is {}x{}",
                layout.word, width, height, config.canvas_width, config.canvas_height
            )));
        }
        if layout.char_count() > layout.cells() {
            return Err(StampError::InvalidLayout(format!(
                "face {:?} does not fit a {}x{} grid",
                layout.word, layout.columns, layout.rows
            )));
        }
    }
    let joined: String = layouts.iter().map(|layout| layout.word.as_str()).collect();
    if joined != text {
        return Err(StampError::InvalidLayout(format!(
            "faces spell {joined:?}, expected {text:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_check_layouts_accepts_partition() {
        let layouts = vec![
            LayoutDescriptor::new(Category::Rect, 2, 2, "ABCD"),
            LayoutDescriptor::new(Category::Round, 1, 3, "EFG"),
        ];
        assert!(check_layouts("ABCDEFG", &layouts, &StampConfig::default()).is_ok());
    }

    #[test]
    fn test_check_layouts_rejects_reordering() {
        let layouts = vec![
            LayoutDescriptor::new(Category::Round, 1, 3, "EFG"),
            LayoutDescriptor::new(Category::Rect, 2, 2, "ABCD"),
        ];
        assert!(matches!(
            check_layouts("ABCDEFG", &layouts, &StampConfig::default()),
            Err(StampError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_check_layouts_rejects_overflow_and_empty() {
        let config = StampConfig::default();
        let overflow = vec![LayoutDescriptor::new(Category::Rect, 1, 1, "AB")];
        assert!(check_layouts("AB", &overflow, &config).is_err());

        let empty_grid = vec![LayoutDescriptor::new(Category::Rect, 0, 2, "AB")];
        assert!(check_layouts("AB", &empty_grid, &config).is_err());

        assert!(check_layouts("AB", &[], &config).is_err());
    }

    #[test]
    fn test_check_layouts_rejects_grid_wider_than_canvas() {
        let config = StampConfig::default();
        // 6 x 20 = 120 fits the 122 canvas, 7 x 20 does not
        let fits = vec![LayoutDescriptor::new(Category::Rect, 6, 1, "AB")];
        assert!(check_layouts("AB", &fits, &config).is_ok());

        let wide = vec![LayoutDescriptor::new(Category::Rect, 7, 1, "AB")];
        assert!(matches!(
            check_layouts("AB", &wide, &config),
            Err(StampError::InvalidLayout(_))
        ));

        let huge = vec![LayoutDescriptor::new(Category::Rect, u32::MAX, u32::MAX, "AB")];
        assert!(matches!(
            check_layouts("AB", &huge, &config),
            Err(StampError::InvalidLayout(_))
        ));
    }
}
