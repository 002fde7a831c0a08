// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Pipeline drivers. One word at a time, synchronously: enumerate, produce
// the cell raster (rendered or extracted), fan out the augmentations, and
// persist every variant before advancing. Failures on one word are recorded
// and skipped; only resource acquisition aborts the run.

use naqsh_core::{
    Alphabet, CorpusConfig, LabelCodec, NaqshError, Result, RunSummary, Word, WordEnumerator,
};
use tracing::{info, instrument, warn};

use crate::augment;
use crate::extract::region::RegionExtractor;
use crate::extract::source::PageSource;
use crate::pdf::composer::SheetComposer;
use crate::pdf::inspect::SheetInfo;
use crate::render::cell::CellRenderer;
use crate::render::glyph::GlyphRenderer;
use crate::writer::CorpusWriter;

/// A validated corpus pipeline.
///
/// Construction validates the configuration once; afterwards the enumerator,
/// codec, and grid all refer to the same alphabet and geometry, which is the
/// synchronization contract between the generating and extracting halves.
pub struct Pipeline {
    config: CorpusConfig,
    codec: LabelCodec,
}

impl Pipeline {
    /// Validate `config` and build the pipeline.
    pub fn new(config: CorpusConfig) -> Result<Self> {
        config.validate()?;
        let alphabet = config.alphabet()?;
        Ok(Self {
            codec: LabelCodec::new(alphabet),
            config,
        })
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.codec.alphabet()
    }

    /// A fresh enumerator over the configured word space.
    pub fn enumerator(&self) -> WordEnumerator {
        WordEnumerator::new(self.config.slot_sets(), self.config.mid_length)
    }

    // -- Document production ----------------------------------------------

    /// Render every enumerated word and compose the grid-sheet PDF bytes.
    ///
    /// A word the glyph collaborator cannot render becomes a blank cell so
    /// that grid positions stay aligned with enumeration order; dropping the
    /// cell instead would shift every later label by one.
    #[instrument(skip_all)]
    pub fn compose_sheets(&self, glyphs: &impl GlyphRenderer) -> Result<Vec<u8>> {
        let renderer = CellRenderer::from_grid(&self.config.grid);
        let (cell_width, cell_height) = renderer.dimensions();

        let mut cells = Vec::new();
        for (index, word) in self.enumerator().enumerate() {
            match renderer.render(&word, glyphs) {
                Ok(cell) => cells.push(cell),
                Err(err) => {
                    warn!(index, word = %word, %err, "Blank cell for unrenderable word");
                    cells.push(image::GrayImage::from_pixel(
                        cell_width,
                        cell_height,
                        image::Luma([255u8]),
                    ));
                }
            }
        }

        let mut composer = SheetComposer::new(self.config.grid);
        composer.set_title("Naqsh Word Sheets");
        composer.compose(&cells)
    }

    // -- Synthetic generation ---------------------------------------------

    /// Generate the corpus directly: render, augment, write.
    #[instrument(skip_all)]
    pub fn generate(&self, glyphs: &impl GlyphRenderer) -> Result<RunSummary> {
        let writer = CorpusWriter::create(&self.config.output_root, self.codec.clone())?;
        let renderer = CellRenderer::from_grid(&self.config.grid);

        let enumerator = self.enumerator();
        let mut summary = RunSummary::begin(enumerator.total());
        info!(words = summary.words_total, "Starting synthetic generation");

        for (index, word) in enumerator.enumerate() {
            let index = index as u64;
            match self.render_and_write(&renderer, glyphs, &writer, &word) {
                Ok(written) => summary.record_processed(written),
                Err(err) => {
                    warn!(index, word = %word, %err, "Skipping word");
                    summary.record_failure(index, Some(word.text()), err);
                }
            }
        }

        self.finish(&writer, summary)
    }

    fn render_and_write(
        &self,
        renderer: &CellRenderer,
        glyphs: &impl GlyphRenderer,
        writer: &CorpusWriter,
        word: &Word,
    ) -> Result<u64> {
        let cell = renderer.render(word, glyphs)?;
        let variants = augment::apply(&cell, &self.config.augmentations);
        let written = writer.write(word, &variants)?;
        Ok(written.len() as u64)
    }

    // -- Extraction -------------------------------------------------------

    /// Check that an already-rendered words document has enough pages for
    /// the enumerated word count, logging any shortfall.
    ///
    /// Extraction can still proceed (trailing words simply fail per-word),
    /// but a shortfall almost always means the grid parameters drifted from
    /// the ones the document was composed with.
    #[instrument(skip_all)]
    pub fn check_sheet(&self, info: &SheetInfo) -> bool {
        let needed = self.config.grid.pages_needed(self.enumerator().total());
        let actual = info.page_count() as u64;
        if actual < needed {
            warn!(
                needed,
                actual,
                "Word sheets have fewer pages than the enumeration requires"
            );
            return false;
        }
        true
    }

    /// Extract the corpus from pre-rasterized pages: copy each grid cell,
    /// augment, write.
    ///
    /// A cell whose region clips to zero area is logged with its coordinates
    /// and skipped; its word is absent from the corpus and counted in the
    /// summary instead of failing the run.
    #[instrument(skip_all)]
    pub fn extract(&self, source: &impl PageSource) -> Result<RunSummary> {
        let writer = CorpusWriter::create(&self.config.output_root, self.codec.clone())?;
        let extractor = RegionExtractor::new(source, self.config.grid);

        let enumerator = self.enumerator();
        let mut summary = RunSummary::begin(enumerator.total());
        info!(
            words = summary.words_total,
            pages = source.page_count(),
            "Starting extraction"
        );

        for (index, word) in enumerator.enumerate() {
            let index = index as u64;
            match extractor.extract(index) {
                Ok(cell) => {
                    let variants = augment::apply(&cell, &self.config.augmentations);
                    match writer.write(&word, &variants) {
                        Ok(written) => summary.record_processed(written.len() as u64),
                        Err(err) => {
                            warn!(index, word = %word, %err, "Skipping word");
                            summary.record_failure(index, Some(word.text()), err);
                        }
                    }
                }
                Err(err @ NaqshError::EmptyRegion { .. }) => {
                    warn!(index, word = %word, %err, "Skipping empty cell");
                    summary.record_empty_cell();
                }
                Err(err) => {
                    warn!(index, word = %word, %err, "Skipping word");
                    summary.record_failure(index, Some(word.text()), err);
                }
            }
        }

        self.finish(&writer, summary)
    }

    fn finish(&self, writer: &CorpusWriter, mut summary: RunSummary) -> Result<RunSummary> {
        summary.finish();
        writer.write_summary(&summary)?;
        info!(
            run_id = %summary.run_id,
            processed = summary.words_processed,
            images = summary.images_written,
            skipped_empty = summary.cells_skipped_empty,
            failures = summary.failures.len(),
            complete = summary.is_complete(),
            "Run finished"
        );
        Ok(summary)
    }
}
