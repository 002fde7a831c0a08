// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Word-cell renderer — the synthetic variant of the region contract: given a
// word, produce the grayscale raster of its grid cell.

use image::{GrayImage, Luma};
use naqsh_core::{GridSpec, NaqshError, Result, Word};
use tracing::instrument;

use crate::render::glyph::GlyphRenderer;

/// Renders one word centered on a white canvas of fixed cell size.
///
/// Output is deterministic for identical inputs and already single-channel,
/// so it feeds the augmentation pipeline directly. The canvas dimensions
/// must be the grid's cell dimensions, otherwise composed sheets and the
/// extractor disagree about what a cell contains.
#[derive(Debug, Clone, Copy)]
pub struct CellRenderer {
    width: u32,
    height: u32,
}

impl CellRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Cell renderer sized from the shared grid geometry.
    pub fn from_grid(grid: &GridSpec) -> Self {
        Self::new(grid.cell_width, grid.cell_height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draw `word` centered in a fresh white cell.
    ///
    /// Fails with [`NaqshError::Render`] when the glyph collaborator cannot
    /// produce any extent for the text (an unsupported glyph set); the
    /// driving loop skips that word and continues.
    #[instrument(skip(self, glyphs), fields(word = %word))]
    pub fn render(&self, word: &Word, glyphs: &impl GlyphRenderer) -> Result<GrayImage> {
        let mut canvas = GrayImage::from_pixel(self.width, self.height, Luma([255u8]));

        let text = word.text();
        let (text_width, text_height) = glyphs.measure(&text);
        if text_width == 0 || text_height == 0 {
            return Err(NaqshError::Render(format!(
                "glyph renderer produced zero extent for '{}'",
                word
            )));
        }

        let x = (self.width as i32 - text_width as i32) / 2;
        let y = (self.height as i32 - text_height as i32) / 2;
        glyphs.draw(&mut canvas, &text, x, y);

        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Glyph stub that records draw calls and reports a fixed text extent.
    struct FixedExtent {
        width: u32,
        height: u32,
        draws: RefCell<Vec<(String, i32, i32)>>,
    }

    impl FixedExtent {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                draws: RefCell::new(Vec::new()),
            }
        }
    }

    impl GlyphRenderer for FixedExtent {
        fn measure(&self, _text: &str) -> (u32, u32) {
            (self.width, self.height)
        }

        fn draw(&self, canvas: &mut GrayImage, text: &str, x: i32, y: i32) {
            self.draws.borrow_mut().push((text.to_string(), x, y));
            // Mark one pixel so callers can see something was drawn.
            if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                canvas.put_pixel(x as u32, y as u32, Luma([0u8]));
            }
        }
    }

    fn word() -> Word {
        "نبا".chars().collect()
    }

    /// The canvas has the configured cell size, starts white, and the text
    /// is drawn centered.
    #[test]
    fn renders_centered_on_white_cell() {
        let renderer = CellRenderer::new(130, 100);
        let glyphs = FixedExtent::new(60, 40);

        let cell = renderer.render(&word(), &glyphs).unwrap();
        assert_eq!(cell.dimensions(), (130, 100));

        let draws = glyphs.draws.borrow();
        assert_eq!(draws.len(), 1);
        let (text, x, y) = &draws[0];
        assert_eq!(text, "نبا");
        assert_eq!((*x, *y), ((130 - 60) / 2, (100 - 40) / 2));

        // Everything except the stub's marker pixel stays white.
        let dark = cell.pixels().filter(|p| p.0[0] != 255).count();
        assert_eq!(dark, 1);
    }

    /// Text wider than the cell centers with a negative offset instead of
    /// failing; clipping is the glyph renderer's job.
    #[test]
    fn oversized_text_gets_negative_offset() {
        let renderer = CellRenderer::new(50, 40);
        let glyphs = FixedExtent::new(80, 20);

        renderer.render(&word(), &glyphs).unwrap();

        let draws = glyphs.draws.borrow();
        assert_eq!(draws[0].1, (50 - 80) / 2);
    }

    /// A zero-extent measurement is a per-word render failure.
    #[test]
    fn zero_extent_is_render_error() {
        let renderer = CellRenderer::new(130, 100);
        let glyphs = FixedExtent::new(0, 0);

        assert!(matches!(
            renderer.render(&word(), &glyphs),
            Err(NaqshError::Render(_))
        ));
    }
}
