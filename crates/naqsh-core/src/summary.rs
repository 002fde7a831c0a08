// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Run bookkeeping. A pipeline run records what it skipped and what failed so
// completeness can be asserted afterwards instead of scraping console logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Unique identifier for a corpus run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One word the pipeline could not process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordFailure {
    /// Linear index of the word in enumeration order.
    pub index: u64,
    /// The word text, when enumeration got that far.
    pub word: Option<String>,
    /// Display form of the error that stopped it.
    pub error: String,
}

/// Completeness report for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Words the enumerator defines for this configuration.
    pub words_total: u64,
    /// Words fully processed (all requested augmentations written).
    pub words_processed: u64,
    /// Images persisted across all techniques.
    pub images_written: u64,
    /// Cells dropped because their page region had zero area.
    pub cells_skipped_empty: u64,
    /// Per-word failures, in encounter order.
    pub failures: Vec<WordFailure>,
}

impl RunSummary {
    /// Start bookkeeping for a run over `words_total` words.
    pub fn begin(words_total: u64) -> Self {
        Self {
            run_id: RunId::new(),
            started_at: Utc::now(),
            finished_at: None,
            words_total,
            words_processed: 0,
            images_written: 0,
            cells_skipped_empty: 0,
            failures: Vec::new(),
        }
    }

    /// Record a fully processed word and how many images it produced.
    pub fn record_processed(&mut self, images: u64) {
        self.words_processed += 1;
        self.images_written += images;
    }

    /// Record a cell skipped because its region was empty.
    pub fn record_empty_cell(&mut self) {
        self.cells_skipped_empty += 1;
    }

    /// Record a word-level failure.
    pub fn record_failure(&mut self, index: u64, word: Option<String>, error: impl ToString) {
        self.failures.push(WordFailure {
            index,
            word,
            error: error.to_string(),
        });
    }

    /// Stamp the end of the run.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// True when every enumerated word was processed.
    pub fn is_complete(&self) -> bool {
        self.words_processed == self.words_total
    }

    /// Pretty-printed JSON form, for persisting next to the corpus.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
