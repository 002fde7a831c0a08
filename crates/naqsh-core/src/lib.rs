// SPDX-License-Identifier: PMPL-1.0-or-later
//
// naqsh-core — Domain types shared across the Naqsh corpus generator:
// the alphabet and positional letter sets, word enumeration, the canonical
// label codec, grid layout planning, configuration, and run bookkeeping.

pub mod alphabet;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod label;
pub mod layout;
pub mod summary;
pub mod word;

pub use alphabet::{Alphabet, SlotSets};
pub use config::{Augmentation, CorpusConfig};
pub use enumerate::WordEnumerator;
pub use error::{NaqshError, Result};
pub use label::LabelCodec;
pub use layout::{GridSlot, GridSpec, PixelRect};
pub use summary::{RunId, RunSummary, WordFailure};
pub use word::Word;
