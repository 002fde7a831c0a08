// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Glyph rendering collaborator. The pipeline itself has no font engine; it
// asks this trait to measure and draw text, and the default implementation
// delegates to `ab_glyph` + `imageproc`'s text drawing.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_text_mut;
use naqsh_core::{NaqshError, Result};
use tracing::{debug, instrument};

/// Minimal capability surface the cell renderer needs from a font engine.
pub trait GlyphRenderer {
    /// Pixel dimensions the text would occupy when drawn.
    fn measure(&self, text: &str) -> (u32, u32);

    /// Draw `text` in black onto a grayscale canvas with its top-left corner
    /// at `(x, y)`. Coordinates may be negative when the text overflows the
    /// canvas; overflowing pixels are clipped.
    fn draw(&self, canvas: &mut GrayImage, text: &str, x: i32, y: i32);
}

/// Font-file-backed glyph renderer.
///
/// Renders each codepoint's nominal glyph at a fixed scale.
// TODO: contextual joining forms (initial/medial/final) need a shaping pass
// (rustybuzz) before glyph placement; nominal forms are what the reference
// corpus rendered.
pub struct AbGlyphRenderer {
    font: FontVec,
    scale: PxScale,
}

impl AbGlyphRenderer {
    /// Load a TrueType/OpenType font from disk.
    ///
    /// Failure is fatal for the run: without the font nothing can be
    /// rendered, so the error is a resource-acquisition error rather than a
    /// per-word one.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), scale))]
    pub fn from_file(path: impl AsRef<Path>, scale: f32) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref()).map_err(|err| {
            NaqshError::ResourceAcquisition(format!(
                "cannot read font {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Self::from_bytes(bytes, scale)
    }

    /// Parse a font from raw bytes already in memory.
    pub fn from_bytes(bytes: Vec<u8>, scale: f32) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|err| {
            NaqshError::ResourceAcquisition(format!("cannot parse font: {}", err))
        })?;
        debug!(scale, "Font loaded");
        Ok(Self {
            font,
            scale: PxScale::from(scale),
        })
    }
}

impl GlyphRenderer for AbGlyphRenderer {
    fn measure(&self, text: &str) -> (u32, u32) {
        let scaled = self.font.as_scaled(self.scale);

        let mut width = 0.0f32;
        for ch in text.chars() {
            let glyph = scaled.scaled_glyph(ch);
            width += scaled.h_advance(glyph.id);
        }

        (width.ceil() as u32, scaled.height().ceil() as u32)
    }

    fn draw(&self, canvas: &mut GrayImage, text: &str, x: i32, y: i32) {
        draw_text_mut(canvas, Luma([0u8]), x, y, self.scale, &self.font, text);
    }
}
