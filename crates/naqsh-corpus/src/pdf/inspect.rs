// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Sheet inspector — opens an existing words PDF with `lopdf` and reports
// page count and page dimensions. The extract pipeline uses it before
// touching any pixels: if the document has fewer pages than the grid needs
// for the enumerated word count, every label from the first missing cell
// onward would be wrong, so the mismatch is surfaced up front.

use std::path::Path;

use lopdf::{Document, Object};
use naqsh_core::{NaqshError, Result};
use tracing::{debug, info, instrument};

/// Read-only view of a words PDF.
pub struct SheetInfo {
    document: Document,
    source_path: Option<String>,
}

impl SheetInfo {
    /// Open a PDF from the filesystem.
    ///
    /// The source document is the one long-lived resource of an extraction
    /// run; failure to open it is fatal.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening word sheets: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            NaqshError::ResourceAcquisition(format!(
                "failed to open {}: {}",
                path_ref.display(),
                err
            ))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create an inspector from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            NaqshError::ResourceAcquisition(format!("failed to load PDF from memory: {}", err))
        })?;

        Ok(Self {
            document,
            source_path: None,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the inspector was created via [`SheetInfo::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// MediaBox dimensions of a page (1-indexed) in points.
    ///
    /// Follows the /Parent chain when the page inherits its MediaBox from
    /// the page tree.
    pub fn page_dimensions(&self, page_number: u32) -> Result<(f32, f32)> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            NaqshError::Pdf(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let mut object_id = page_id;
        // Walk up the page tree looking for an explicit MediaBox. Depth is
        // bounded to keep malformed cyclic documents from hanging us.
        for _ in 0..16 {
            let dict = match self.document.get_object(object_id) {
                Ok(Object::Dictionary(dict)) => dict,
                Ok(other) => {
                    return Err(NaqshError::Pdf(format!(
                        "page tree node {:?} is not a dictionary: {:?}",
                        object_id, other
                    )));
                }
                Err(err) => {
                    return Err(NaqshError::Pdf(format!(
                        "cannot read page tree node {:?}: {}",
                        object_id, err
                    )));
                }
            };

            if let Ok(Object::Array(media_box)) = dict.get(b"MediaBox") {
                return media_box_dimensions(media_box);
            }

            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => object_id = *parent_id,
                _ => break,
            }
        }

        Err(NaqshError::Pdf(format!(
            "page {} has no MediaBox",
            page_number
        )))
    }
}

/// Width/height from a `[x0 y0 x1 y1]` MediaBox array.
fn media_box_dimensions(media_box: &[Object]) -> Result<(f32, f32)> {
    if media_box.len() != 4 {
        return Err(NaqshError::Pdf(format!(
            "MediaBox has {} entries, expected 4",
            media_box.len()
        )));
    }

    let mut coords = [0.0f32; 4];
    for (slot, object) in coords.iter_mut().zip(media_box) {
        *slot = match object {
            Object::Integer(value) => *value as f32,
            Object::Real(value) => *value,
            other => {
                return Err(NaqshError::Pdf(format!(
                    "MediaBox entry is not numeric: {:?}",
                    other
                )));
            }
        };
    }

    Ok(((coords[2] - coords[0]).abs(), (coords[3] - coords[1]).abs()))
}
