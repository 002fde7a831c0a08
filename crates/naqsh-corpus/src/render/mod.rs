// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Synthetic rendering — draws enumerated words into fixed-size grayscale
// cells through a glyph-rendering collaborator.

pub mod cell;
pub mod glyph;

pub use cell::CellRenderer;
pub use glyph::{AbGlyphRenderer, GlyphRenderer};
