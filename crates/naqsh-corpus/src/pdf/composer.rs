// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Grid-sheet composer — builds the printable words document with `printpdf`
// 0.8's data-oriented API: pages are `PdfPage` structs holding `Vec<Op>`
// operation lists, serialised via `PdfDocument::save()`.
//
// Placement comes from the shared `GridSpec`, at 1 px = 1 pt (72 dpi), so
// the rectangles the extractor reads later are the same numbers the
// composer writes here.

use std::path::Path;

use image::{DynamicImage, GrayImage};
use naqsh_core::{GridSpec, NaqshError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Points per millimetre (PDF user space is 72 pt per inch).
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Composes rendered word cells into a multi-page grid-sheet PDF.
pub struct SheetComposer {
    grid: GridSpec,
    title: Option<String>,
}

impl SheetComposer {
    pub fn new(grid: GridSpec) -> Self {
        Self { grid, title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Page dimensions in printpdf's Mm units, derived from the grid.
    fn page_dimensions(&self) -> (Mm, Mm) {
        (
            Mm(self.grid.page_width() as f32 * MM_PER_PT),
            Mm(self.grid.page_height() as f32 * MM_PER_PT),
        )
    }

    /// Compose cell images, in enumeration order, into PDF bytes.
    ///
    /// Cell `i` lands at the grid's slot `i`; pages are appended as slots
    /// wrap. An empty cell list produces a single blank page.
    #[instrument(skip_all, fields(cells = cells.len()))]
    pub fn compose(&self, cells: &[GrayImage]) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let page_height_pt = self.grid.page_height() as f32;
        let title = self.title.as_deref().unwrap_or("Naqsh Word Sheets");

        info!(
            cells = cells.len(),
            pages = self.grid.pages_needed(cells.len() as u64),
            "Composing grid sheets"
        );

        let mut doc = PdfDocument::new(title);
        let mut page_ops: Vec<Vec<Op>> = Vec::new();

        for (index, cell) in cells.iter().enumerate() {
            let slot = self.grid.slot(index as u64);
            if page_ops.len() <= slot.page {
                page_ops.resize_with(slot.page + 1, Vec::new);
            }

            // printpdf wants interleaved RGB; expand the grayscale cell.
            let rgb = DynamicImage::ImageLuma8(cell.clone()).to_rgb8();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: cell.width() as usize,
                height: cell.height() as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            // PDF origin is bottom-left; the grid's is top-left.
            let x_pt = slot.rect.left as f32;
            let y_pt = page_height_pt - slot.rect.bottom as f32;

            page_ops[slot.page].push(Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(x_pt)),
                    translate_y: Some(Pt(y_pt)),
                    scale_x: Some(1.0),
                    scale_y: Some(1.0),
                    dpi: Some(72.0),
                    rotate: None,
                },
            });
        }

        let mut pages: Vec<PdfPage> = page_ops
            .into_iter()
            .map(|ops| PdfPage::new(page_w, page_h, ops))
            .collect();
        if pages.is_empty() {
            pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            pages = page_count,
            output_bytes = output.len(),
            "Grid sheets serialised"
        );
        Ok(output)
    }

    /// Compose and write the sheets directly to a file.
    pub fn write_to_file(&self, cells: &[GrayImage], path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.compose(cells)?;
        std::fs::write(path.as_ref(), &bytes).map_err(NaqshError::Io)?;
        info!("Wrote word sheets to {}", path.as_ref().display());
        Ok(())
    }
}
