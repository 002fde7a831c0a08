// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Region extractor — binds a page source to the shared grid geometry so a
// linear word index resolves directly to its cell pixels.

use image::GrayImage;
use naqsh_core::{GridSpec, NaqshError, Result};

use crate::extract::source::PageSource;

/// The extraction variant of the region contract.
///
/// Must be constructed with the same `GridSpec` the sheet composer used;
/// the grid is the only thing tying cell pixels back to word identities.
pub struct RegionExtractor<'a, S: PageSource> {
    source: &'a S,
    grid: GridSpec,
}

impl<'a, S: PageSource> RegionExtractor<'a, S> {
    pub fn new(source: &'a S, grid: GridSpec) -> Self {
        Self { source, grid }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Extract the cell image for the word at linear index `index`.
    ///
    /// Propagates [`NaqshError::EmptyRegion`] for page-edge cells; maps a
    /// slot beyond the source's last page to an error the driver records as
    /// a per-word failure.
    pub fn extract(&self, index: u64) -> Result<GrayImage> {
        let slot = self.grid.slot(index);
        if slot.page >= self.source.page_count() {
            return Err(NaqshError::Image(format!(
                "word {} maps to page {} but the source has only {} pages",
                index,
                slot.page,
                self.source.page_count()
            )));
        }
        self.source.render_region(slot.page, &slot.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::source::PageImages;
    use image::Luma;

    fn grid() -> GridSpec {
        GridSpec {
            rows_per_page: 1,
            columns_per_page: 2,
            cell_width: 60,
            cell_height: 50,
            origin_x: 0,
            origin_y: 0,
        }
    }

    /// Index 0 and 1 resolve to the two cells of page 0; index 2 needs a
    /// second page.
    #[test]
    fn indices_resolve_through_grid_and_source() {
        let page = GrayImage::from_pixel(120, 50, Luma([128u8]));
        let source = PageImages::from_images(vec![page]);
        let extractor = RegionExtractor::new(&source, grid());

        assert_eq!(extractor.extract(0).unwrap().dimensions(), (60, 50));
        assert_eq!(extractor.extract(1).unwrap().dimensions(), (60, 50));
        assert!(matches!(
            extractor.extract(2),
            Err(NaqshError::Image(_))
        ));
    }

    /// A cell whose rectangle starts past the page edge is an empty region.
    #[test]
    fn edge_cell_is_empty_region() {
        // Page only wide enough for the first column.
        let page = GrayImage::from_pixel(60, 50, Luma([128u8]));
        let source = PageImages::from_images(vec![page]);
        let extractor = RegionExtractor::new(&source, grid());

        assert!(extractor.extract(0).is_ok());
        assert!(matches!(
            extractor.extract(1),
            Err(NaqshError::EmptyRegion { page: 0, .. })
        ));
    }
}
