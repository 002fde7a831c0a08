// SPDX-License-Identifier: PMPL-1.0-or-later
//
// The fixed ordered alphabet and the positional letter sets that constrain
// which letters may occupy each slot of a generated word.

use std::collections::HashMap;

use crate::error::{NaqshError, Result};

/// The 37 letters of the Urdu alphabet, in canonical order.
const URDU_LETTERS: [char; 37] = [
    'ا', 'ب', 'پ', 'ت', 'ٹ', 'ث', 'ج', 'چ', 'ح', 'خ', 'د', 'ڈ', 'ذ', 'ر', 'ڑ', 'ز', 'ژ', 'س',
    'ش', 'ص', 'ض', 'ط', 'ظ', 'ع', 'غ', 'ف', 'ق', 'ک', 'گ', 'ل', 'م', 'ن', 'و', 'ہ', 'ء', 'ی',
    'ے',
];

/// An ordered sequence of distinct letters.
///
/// A letter's 1-based position in the sequence is its canonical index. The
/// index assignment is the labeling contract for the whole system: the
/// enumerator, the label codec, and every renderer must be constructed from
/// the same `Alphabet` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
    // 1-based index per letter, precomputed at construction.
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from an ordered letter sequence.
    ///
    /// Fails with [`NaqshError::Configuration`] if the sequence is empty,
    /// contains a duplicate letter, or holds more than 99 letters (indices
    /// must fit the two-digit label token field).
    pub fn new(letters: Vec<char>) -> Result<Self> {
        if letters.is_empty() {
            return Err(NaqshError::Configuration(
                "alphabet must not be empty".to_string(),
            ));
        }
        if letters.len() > 99 {
            return Err(NaqshError::Configuration(format!(
                "alphabet has {} letters; the two-digit index field supports at most 99",
                letters.len()
            )));
        }

        let mut index = HashMap::with_capacity(letters.len());
        for (position, &letter) in letters.iter().enumerate() {
            if index.insert(letter, position + 1).is_some() {
                return Err(NaqshError::Configuration(format!(
                    "alphabet contains duplicate letter '{}'",
                    letter
                )));
            }
        }

        Ok(Self { letters, index })
    }

    /// The default Urdu alphabet.
    pub fn urdu() -> Self {
        Self::new(URDU_LETTERS.to_vec()).expect("built-in Urdu alphabet is valid")
    }

    /// Number of letters in the alphabet.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The ordered letter sequence.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// 1-based canonical index of a letter, if present.
    pub fn index_of(&self, letter: char) -> Option<usize> {
        self.index.get(&letter).copied()
    }

    /// Letter at a 1-based canonical index, if in range.
    pub fn letter_at(&self, index: usize) -> Option<char> {
        if index == 0 {
            return None;
        }
        self.letters.get(index - 1).copied()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.index.contains_key(&letter)
    }
}

/// The three positional subsets constraining word slots.
///
/// Slot 1 of a word draws from `start`, the interior slots from `mid`, and
/// the final slot from `end`. The sets need not be disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSets {
    pub start: Vec<char>,
    pub mid: Vec<char>,
    pub end: Vec<char>,
}

impl SlotSets {
    /// The default position sets used by the reference corpus.
    pub fn urdu_default() -> Self {
        Self {
            start: vec!['ن'],
            mid: vec![
                'ب', 'ج', 'س', 'ص', 'ط', 'ع', 'ف', 'ق', 'ک', 'ل', 'م', 'ن', 'ہ', 'ی',
            ],
            end: vec![
                'ا', 'ب', 'ج', 'د', 'ر', 'س', 'ص', 'ط', 'ع', 'ف', 'ق', 'ک', 'ل', 'م', 'ن', 'و',
                'ہ', 'ی', 'ے',
            ],
        }
    }

    /// Verify that every letter of every position set is in `alphabet`.
    ///
    /// This is the startup invariant that makes [`NaqshError::UnknownLetter`]
    /// unreachable for enumerator output.
    pub fn validate_against(&self, alphabet: &Alphabet) -> Result<()> {
        for (name, set) in [("start", &self.start), ("mid", &self.mid), ("end", &self.end)] {
            for &letter in set {
                if !alphabet.contains(letter) {
                    return Err(NaqshError::Configuration(format!(
                        "{} set contains letter '{}' absent from the alphabet",
                        name, letter
                    )));
                }
            }
        }
        Ok(())
    }
}
