// SPDX-License-Identifier: PMPL-1.0-or-later
//
// A word is an ordered, fixed-length sequence of alphabet letters.

use serde::{Deserialize, Serialize};

/// An ordered sequence of letters produced by the enumerator.
///
/// Words are plain character sequences; membership of each slot in the
/// configured start/mid/end sets is guaranteed by construction in
/// [`crate::WordEnumerator`], not re-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(Vec<char>);

impl Word {
    pub fn new(letters: Vec<char>) -> Self {
        Self(letters)
    }

    /// The letters of the word, in order.
    pub fn letters(&self) -> &[char] {
        &self.0
    }

    /// Number of letters (slots) in the word.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The word as a displayable string.
    pub fn text(&self) -> String {
        self.0.iter().collect()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for letter in &self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl FromIterator<char> for Word {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
