// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Corpus writer — persists augmented word images under the output root,
// naming each file with the word's label token plus the technique label.
// The filename is the ground-truth label: downstream consumers reconstruct
// the word from it alone.

use std::path::{Path, PathBuf};

use image::GrayImage;
use naqsh_core::{LabelCodec, NaqshError, Result, RunSummary, Word};
use tracing::{debug, info, instrument};

/// File name of the completeness report written next to the images.
const SUMMARY_FILE: &str = "run_summary.json";

/// Writes labeled corpus images into a single output directory.
pub struct CorpusWriter {
    root: PathBuf,
    codec: LabelCodec,
}

impl CorpusWriter {
    /// Create the writer, ensuring the output root exists.
    ///
    /// Creation is idempotent; an unwritable root is fatal for the run.
    #[instrument(skip(codec), fields(root = %root.as_ref().display()))]
    pub fn create(root: impl AsRef<Path>, codec: LabelCodec) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|err| {
            NaqshError::ResourceAcquisition(format!(
                "cannot create output root {}: {}",
                root.display(),
                err
            ))
        })?;
        info!("Corpus output root ready");
        Ok(Self { root, codec })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    /// Persist every augmented variant of one word.
    ///
    /// Returns the written paths. A failure leaves no partial file for the
    /// failing variant; variants already written for this word remain (the
    /// contract is at-least-once per call, and rewriting identical content
    /// is a no-op in effect).
    #[instrument(skip(self, images), fields(word = %word, variants = images.len()))]
    pub fn write(&self, word: &Word, images: &[(GrayImage, &'static str)]) -> Result<Vec<PathBuf>> {
        let token = self.codec.encode(word)?;

        let mut written = Vec::with_capacity(images.len());
        for (image, technique) in images {
            let path = self.root.join(format!("{}_{}.png", token, technique));
            image.save(&path).map_err(|err| {
                NaqshError::Image(format!("failed to save {}: {}", path.display(), err))
            })?;
            debug!(path = %path.display(), "Image written");
            written.push(path);
        }
        Ok(written)
    }

    /// Persist the run's completeness report as JSON next to the images.
    pub fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf> {
        let path = self.root.join(SUMMARY_FILE);
        std::fs::write(&path, summary.to_json()?)?;
        info!(path = %path.display(), "Run summary written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use naqsh_core::Alphabet;

    fn codec() -> LabelCodec {
        LabelCodec::new(Alphabet::new(vec!['ا', 'ب', 'ن']).unwrap())
    }

    fn cell(shade: u8) -> GrayImage {
        GrayImage::from_pixel(20, 10, Luma([shade]))
    }

    /// Files land under the root with token + technique names, and the
    /// token in the filename decodes back to the word.
    #[test]
    fn writes_label_encoded_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CorpusWriter::create(dir.path(), codec()).unwrap();
        let word: Word = "نبا".chars().collect();

        let paths = writer
            .write(&word, &[(cell(255), "none"), (cell(0), "erosion")])
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("03_03_02_01_none.png"));
        assert!(paths[1].ends_with("03_03_02_01_erosion.png"));
        for path in &paths {
            assert!(path.exists());
        }

        // The filename alone recovers the word.
        let stem = paths[0].file_stem().unwrap().to_str().unwrap();
        let token = stem.rsplit_once('_').unwrap().0;
        assert_eq!(writer.codec().decode(token).unwrap(), word);
    }

    /// Creating the writer twice over the same root is fine, and rewriting
    /// a file is not an error.
    #[test]
    fn creation_and_rewrite_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let word: Word = "نبا".chars().collect();

        let writer = CorpusWriter::create(dir.path(), codec()).unwrap();
        writer.write(&word, &[(cell(10), "none")]).unwrap();

        let writer = CorpusWriter::create(dir.path(), codec()).unwrap();
        writer.write(&word, &[(cell(10), "none")]).unwrap();

        assert!(dir.path().join("03_03_02_01_none.png").exists());
    }

    /// The summary report is readable JSON carrying the counters.
    #[test]
    fn summary_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CorpusWriter::create(dir.path(), codec()).unwrap();

        let mut summary = RunSummary::begin(2);
        summary.record_processed(5);
        summary.finish();

        let path = writer.write_summary(&summary).unwrap();
        let json = std::fs::read_to_string(path).unwrap();
        let parsed: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.words_total, 2);
        assert_eq!(parsed.images_written, 5);
    }
}
