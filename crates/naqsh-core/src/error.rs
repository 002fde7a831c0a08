// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Unified error types for Naqsh.

use thiserror::Error;

/// Top-level error type for all Naqsh operations.
#[derive(Debug, Error)]
pub enum NaqshError {
    // -- Startup / configuration --
    #[error("configuration invalid: {0}")]
    Configuration(String),

    #[error("resource acquisition failed: {0}")]
    ResourceAcquisition(String),

    // -- Labeling --
    #[error("letter '{0}' is not in the alphabet")]
    UnknownLetter(char),

    #[error("malformed label token: {0}")]
    MalformedToken(String),

    #[error("alphabet index {index} out of range 1..={max}")]
    IndexRange { index: usize, max: usize },

    // -- Extraction --
    #[error("empty region on page {page}: ({left},{top})-({right},{bottom}) has zero area")]
    EmptyRegion {
        page: usize,
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    },

    // -- Document / image operations --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("glyph rendering failed: {0}")]
    Render(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NaqshError>;
