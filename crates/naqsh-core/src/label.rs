// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Canonical label codec — bijective mapping between a word and its
// filename-embedded token: zero-padded two-digit length, then one
// zero-padded two-digit 1-based alphabet index per letter, joined by '_'.

use crate::alphabet::Alphabet;
use crate::error::{NaqshError, Result};
use crate::word::Word;

/// Field separator inside a label token.
const SEPARATOR: char = '_';

/// Encodes words into label tokens and decodes tokens back into words.
///
/// The codec is the single authority for the token format. A downstream
/// consumer reconstructs a word solely from the token, so `decode(encode(w))
/// == w` must hold for every word the enumerator can produce, and no two
/// distinct words may share a token.
#[derive(Debug, Clone)]
pub struct LabelCodec {
    alphabet: Alphabet,
}

impl LabelCodec {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encode a word as a label token, e.g. `03_03_02_01`.
    ///
    /// Fails with [`NaqshError::UnknownLetter`] if a letter is not in the
    /// alphabet. Startup validation of the position sets makes that
    /// unreachable for enumerator output.
    pub fn encode(&self, word: &Word) -> Result<String> {
        if word.len() > 99 {
            return Err(NaqshError::MalformedToken(format!(
                "word length {} exceeds the two-digit length field",
                word.len()
            )));
        }

        let mut token = format!("{:02}", word.len());
        for &letter in word.letters() {
            let index = self
                .alphabet
                .index_of(letter)
                .ok_or(NaqshError::UnknownLetter(letter))?;
            token.push(SEPARATOR);
            token.push_str(&format!("{:02}", index));
        }
        Ok(token)
    }

    /// Decode a label token back into the word it encodes.
    ///
    /// Fails with [`NaqshError::MalformedToken`] on wrong digit grouping or a
    /// length field that disagrees with the number of index fields, and with
    /// [`NaqshError::IndexRange`] if any index is zero or exceeds the
    /// alphabet size.
    pub fn decode(&self, token: &str) -> Result<Word> {
        let mut fields = token.split(SEPARATOR);

        let length_field = fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| NaqshError::MalformedToken("empty token".to_string()))?;
        let length = parse_two_digit_field(token, length_field)?;

        let mut letters = Vec::with_capacity(length);
        for field in fields {
            let index = parse_two_digit_field(token, field)?;
            if index == 0 || index > self.alphabet.len() {
                return Err(NaqshError::IndexRange {
                    index,
                    max: self.alphabet.len(),
                });
            }
            let letter = self
                .alphabet
                .letter_at(index)
                .expect("index verified in range");
            letters.push(letter);
        }

        if letters.len() != length {
            return Err(NaqshError::MalformedToken(format!(
                "'{}': length field says {} letters but {} index fields follow",
                token,
                length,
                letters.len()
            )));
        }

        Ok(Word::new(letters))
    }
}

/// Parse one exactly-two-digit token field.
fn parse_two_digit_field(token: &str, field: &str) -> Result<usize> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NaqshError::MalformedToken(format!(
            "'{}': field '{}' is not two decimal digits",
            token, field
        )));
    }
    // Two ASCII digits always parse.
    Ok(field.parse().expect("two-digit field parses"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::SlotSets;
    use crate::enumerate::WordEnumerator;
    use std::collections::HashSet;

    fn three_letter_codec() -> LabelCodec {
        LabelCodec::new(Alphabet::new(vec!['ا', 'ب', 'ن']).unwrap())
    }

    /// Reference scenario: alphabet [ا, ب, ن], word نبا encodes to
    /// "03_03_02_01" and decodes back.
    #[test]
    fn reference_scenario_round_trips() {
        let codec = three_letter_codec();
        let word = Word::new(vec!['ن', 'ب', 'ا']);

        let token = codec.encode(&word).unwrap();
        assert_eq!(token, "03_03_02_01");
        assert_eq!(codec.decode(&token).unwrap(), word);
    }

    /// decode(encode(w)) == w for every word producible by the enumerator,
    /// and all tokens are distinct.
    #[test]
    fn bijection_over_enumerated_space() {
        let alphabet = Alphabet::urdu();
        let codec = LabelCodec::new(alphabet);
        let sets = SlotSets {
            start: vec!['ن'],
            mid: vec!['ب', 'ج', 'س'],
            end: vec!['ا', 'د'],
        };

        let mut tokens = HashSet::new();
        for word in WordEnumerator::new(sets, 2) {
            let token = codec.encode(&word).unwrap();
            assert_eq!(codec.decode(&token).unwrap(), word);
            assert!(tokens.insert(token), "token collision");
        }
        assert_eq!(tokens.len(), 3 * 3 * 2);
    }

    /// Index 0 is rejected.
    #[test]
    fn decode_rejects_zero_index() {
        let codec = three_letter_codec();
        assert!(matches!(
            codec.decode("01_00"),
            Err(NaqshError::IndexRange { index: 0, max: 3 })
        ));
    }

    /// An index past the alphabet end is rejected.
    #[test]
    fn decode_rejects_out_of_range_index() {
        let codec = three_letter_codec();
        assert!(matches!(
            codec.decode("01_04"),
            Err(NaqshError::IndexRange { index: 4, max: 3 })
        ));
    }

    /// Wrong digit grouping is malformed, not an index error.
    #[test]
    fn decode_rejects_bad_grouping() {
        let codec = three_letter_codec();
        for token in ["1_02", "01_2", "01_002", "xx_01", "01_0a", ""] {
            assert!(
                matches!(codec.decode(token), Err(NaqshError::MalformedToken(_))),
                "token '{}' should be malformed",
                token
            );
        }
    }

    /// A length field that disagrees with the index count is malformed.
    #[test]
    fn decode_rejects_length_mismatch() {
        let codec = three_letter_codec();
        assert!(matches!(
            codec.decode("03_01_02"),
            Err(NaqshError::MalformedToken(_))
        ));
        assert!(matches!(
            codec.decode("01_01_02"),
            Err(NaqshError::MalformedToken(_))
        ));
    }

    /// A letter outside the alphabet cannot be encoded.
    #[test]
    fn encode_rejects_unknown_letter() {
        let codec = three_letter_codec();
        let word = Word::new(vec!['ے']);
        assert!(matches!(
            codec.encode(&word),
            Err(NaqshError::UnknownLetter('ے'))
        ));
    }

    /// Full-alphabet five-letter words use the reference index values.
    #[test]
    fn urdu_five_letter_token() {
        let codec = LabelCodec::new(Alphabet::urdu());
        let word: Word = "نببا".chars().collect();
        // ن=32, ب=02, ا=01
        assert_eq!(codec.encode(&word).unwrap(), "04_32_02_02_01");
    }
}
