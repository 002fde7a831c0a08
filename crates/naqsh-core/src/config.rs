// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Corpus generation configuration. All knobs are plain values; validation
// happens once at startup, before any enumeration or rendering.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, SlotSets};
use crate::error::{NaqshError, Result};
use crate::layout::GridSpec;

/// One visual degradation technique with its parameters.
///
/// Techniques are a closed set; an unrecognized technique name in a
/// configuration file fails deserialization instead of being silently
/// skipped at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "technique", rename_all = "lowercase")]
pub enum Augmentation {
    /// Identity copy of the source image.
    #[serde(rename = "none")]
    Identity,
    /// Grayscale erosion with a square structuring element of the given
    /// radius (radius 1 = 3×3).
    Erosion { radius: u8 },
    /// Grayscale dilation, same element shape as erosion.
    Dilation { radius: u8 },
    /// Rigid rotation about the image center; the canvas expands so no
    /// content is clipped.
    Rotation { degrees: f32 },
    /// Horizontal shear; canvas size is held constant, edge clipping is
    /// intentional.
    Shear { factor: f32 },
}

impl Augmentation {
    /// The technique label embedded in corpus filenames.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Identity => "none",
            Self::Erosion { .. } => "erosion",
            Self::Dilation { .. } => "dilation",
            Self::Rotation { .. } => "rotation",
            Self::Shear { .. } => "shear",
        }
    }

    /// The reference technique list: identity plus all four degradations.
    pub fn default_set() -> Vec<Augmentation> {
        vec![
            Self::Identity,
            Self::Erosion { radius: 1 },
            Self::Dilation { radius: 1 },
            Self::Rotation { degrees: 15.0 },
            Self::Shear { factor: 0.2 },
        ]
    }
}

/// Full configuration for a corpus run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Ordered alphabet; position is the canonical 1-based letter index.
    pub alphabet: Vec<char>,
    /// Letters allowed in the first slot of a word.
    pub start_set: Vec<char>,
    /// Letters allowed in the interior slots.
    pub mid_set: Vec<char>,
    /// Letters allowed in the final slot.
    pub end_set: Vec<char>,
    /// Number of interior slots (total word length = mid_length + 2).
    pub mid_length: usize,
    /// Page grid geometry shared by composer and extractor.
    pub grid: GridSpec,
    /// Glyph size in pixels for synthetic cell rendering.
    pub font_scale: f32,
    /// Augmentations applied to every extracted or rendered cell.
    pub augmentations: Vec<Augmentation>,
    /// Directory the corpus images are written into.
    pub output_root: PathBuf,
}

impl Default for CorpusConfig {
    /// The reference corpus: full Urdu alphabet, ن + three interior letters
    /// + one end letter, 7×4 grid of 130×100 cells, all five techniques.
    fn default() -> Self {
        let sets = SlotSets::urdu_default();
        Self {
            alphabet: Alphabet::urdu().letters().to_vec(),
            start_set: sets.start,
            mid_set: sets.mid,
            end_set: sets.end,
            mid_length: 3,
            grid: GridSpec::default(),
            font_scale: 40.0,
            augmentations: Augmentation::default_set(),
            output_root: PathBuf::from("corpus"),
        }
    }
}

impl CorpusConfig {
    /// Build the validated alphabet.
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::new(self.alphabet.clone())
    }

    /// The positional sets as a value the enumerator consumes.
    pub fn slot_sets(&self) -> SlotSets {
        SlotSets {
            start: self.start_set.clone(),
            mid: self.mid_set.clone(),
            end: self.end_set.clone(),
        }
    }

    /// Validate the whole configuration. Any failure here is fatal and
    /// happens before enumeration starts.
    pub fn validate(&self) -> Result<()> {
        let alphabet = self.alphabet()?;
        self.slot_sets().validate_against(&alphabet)?;

        if self.start_set.is_empty() || self.end_set.is_empty() {
            return Err(NaqshError::Configuration(
                "start and end sets must not be empty".to_string(),
            ));
        }
        if self.mid_length > 0 && self.mid_set.is_empty() {
            return Err(NaqshError::Configuration(
                "mid set must not be empty when interior slots are configured".to_string(),
            ));
        }
        if self.mid_length + 2 > 99 {
            return Err(NaqshError::Configuration(format!(
                "word length {} exceeds the two-digit label length field",
                self.mid_length + 2
            )));
        }

        self.grid.validate()?;

        if !self.font_scale.is_finite() || self.font_scale <= 0.0 {
            return Err(NaqshError::Configuration(
                "font scale must be positive".to_string(),
            ));
        }
        for augmentation in &self.augmentations {
            match augmentation {
                Augmentation::Erosion { radius } | Augmentation::Dilation { radius } => {
                    if *radius == 0 {
                        return Err(NaqshError::Configuration(
                            "morphology radius must be at least 1".to_string(),
                        ));
                    }
                }
                Augmentation::Rotation { degrees } => {
                    if !degrees.is_finite() {
                        return Err(NaqshError::Configuration(
                            "rotation angle must be finite".to_string(),
                        ));
                    }
                }
                Augmentation::Shear { factor } => {
                    if !factor.is_finite() {
                        return Err(NaqshError::Configuration(
                            "shear factor must be finite".to_string(),
                        ));
                    }
                }
                Augmentation::Identity => {}
            }
        }

        Ok(())
    }
}
