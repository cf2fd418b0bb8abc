//! Glyph grid placement
//!
//! Characters are laid out row-major into a `rows x columns` grid of square
//! cells centered on the canvas. The first row is vertically centered (and
//! rounded to a whole pixel); the first column of every row is horizontally
//! centered on its own, so no row inherits another row's offset.

use crate::config::StampConfig;
use crate::types::GlyphPlacement;

/// Place the characters of `word` on the canvas
///
/// A word shorter than the grid simply leaves the trailing cells empty; any
/// characters beyond `rows * columns` are not placed.
pub fn place(word: &str, columns: u32, rows: u32, config: &StampConfig) -> Vec<GlyphPlacement> {
    let cell = config.cell_size;
    let top = ((config.canvas_height - rows as f32 * cell) / 2.0).round();

    let mut chars = word.chars();
    let mut placements = Vec::with_capacity(word.chars().count());

    'rows: for row in 0..rows {
        let y = top + row as f32 * cell;
        let left = (config.canvas_width - columns as f32 * cell) / 2.0;
        for column in 0..columns {
            let Some(character) = chars.next() else {
                break 'rows;
            };
            let placement = GlyphPlacement {
                character,
                x: left + column as f32 * cell,
                y,
                cell_size: cell,
            };
            log::trace!("Placed {:?} at ({}, {})", character, placement.x, placement.y);
            placements.push(placement);
        }
    }

    placements
}
