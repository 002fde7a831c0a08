// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Page pixmap collaborator. Rasterizing a PDF is an external concern; this
// module consumes whatever the rasterizer produced (one raster per page)
// and exposes the minimal surface the extractor needs: page count, page
// dimensions, and region copies.

use std::path::Path;

use image::GrayImage;
use image::imageops;
use naqsh_core::{NaqshError, PixelRect, Result};
use tracing::{debug, info, instrument};

/// Minimal capability surface over a rasterized document.
pub trait PageSource {
    /// Number of rasterized pages.
    fn page_count(&self) -> usize;

    /// Pixel dimensions of a zero-indexed page.
    fn page_dimensions(&self, page: usize) -> Result<(u32, u32)>;

    /// Copy the pixels of `rect` (clamped to the page) as a grayscale image.
    ///
    /// Fails with [`NaqshError::EmptyRegion`] when the clamped rectangle has
    /// zero area; the caller skips that cell rather than aborting.
    fn render_region(&self, page: usize, rect: &PixelRect) -> Result<GrayImage>;
}

/// In-memory page rasters, normalized to grayscale at load time.
pub struct PageImages {
    pages: Vec<GrayImage>,
}

impl PageImages {
    /// Wrap already-decoded page rasters (page order = slice order).
    pub fn from_images(pages: Vec<GrayImage>) -> Self {
        Self { pages }
    }

    /// Load every page raster from a directory, in filename order.
    ///
    /// The rasterizer names pages so that lexicographic filename order is
    /// page order (`page-0001.png`, ...). An unreadable directory, an
    /// undecodable file, or an empty directory is fatal: the whole grid
    /// alignment depends on a complete page sequence.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|err| {
            NaqshError::ResourceAcquisition(format!(
                "cannot read page directory {}: {}",
                dir.display(),
                err
            ))
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("png" | "jpg" | "jpeg" | "tif" | "tiff")
                )
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(NaqshError::ResourceAcquisition(format!(
                "no page rasters found in {}",
                dir.display()
            )));
        }

        let mut pages = Vec::with_capacity(paths.len());
        for path in &paths {
            let raster = image::open(path).map_err(|err| {
                NaqshError::ResourceAcquisition(format!(
                    "cannot decode page raster {}: {}",
                    path.display(),
                    err
                ))
            })?;
            pages.push(raster.to_luma8());
        }

        info!(pages = pages.len(), "Page rasters loaded");
        Ok(Self { pages })
    }

    fn page(&self, page: usize) -> Result<&GrayImage> {
        self.pages.get(page).ok_or_else(|| {
            NaqshError::Image(format!(
                "page {} out of range (source has {} pages)",
                page,
                self.pages.len()
            ))
        })
    }
}

impl PageSource for PageImages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_dimensions(&self, page: usize) -> Result<(u32, u32)> {
        Ok(self.page(page)?.dimensions())
    }

    fn render_region(&self, page: usize, rect: &PixelRect) -> Result<GrayImage> {
        let raster = self.page(page)?;
        let (page_width, page_height) = raster.dimensions();

        let clamped = rect.clamp_to(page_width, page_height);
        if clamped.is_empty() {
            return Err(NaqshError::EmptyRegion {
                page,
                left: clamped.left,
                top: clamped.top,
                right: clamped.right,
                bottom: clamped.bottom,
            });
        }

        let region = imageops::crop_imm(
            raster,
            clamped.left,
            clamped.top,
            clamped.width(),
            clamped.height(),
        )
        .to_image();

        debug!(
            page,
            left = clamped.left,
            top = clamped.top,
            width = clamped.width(),
            height = clamped.height(),
            "Region copied"
        );
        Ok(region)
    }
}
