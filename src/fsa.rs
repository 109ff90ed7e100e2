use crate::error::{Error, Result};
use crate::word_vector::WordVector;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A deterministic finite automaton for exact matching of one packed
/// pattern.
///
/// The transition table has `pattern.len() + 1` rows, one per match state,
/// and one column per distinct pattern symbol (columns are assigned in
/// first-seen order). Scanning is a single table lookup per text symbol; a
/// symbol the pattern never uses resets the automaton to state 0. The table
/// is built once and reused across any number of scans.
///
/// The FM-index is the preferred way to locate patterns; this automaton is
/// the non-succinct baseline with `O(|pattern| * sigma)` construction and
/// `O(|text|)` scans.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fsa {
    transitions: Vec<Vec<usize>>,
    columns: HashMap<u64, usize>,
    width: usize,
    pattern_len: usize,
}

impl Fsa {
    /// Builds the transition table for `pattern`.
    pub fn new(pattern: &WordVector) -> Fsa {
        let mut columns: HashMap<u64, usize> = HashMap::new();
        for symbol in pattern.iter() {
            let next = columns.len();
            columns.entry(symbol).or_insert(next);
        }

        let m = pattern.len();
        let mut transitions = vec![vec![0usize; columns.len()]; m + 1];
        for state in 1..=m {
            let column = columns[&pattern.get_unchecked(state - 1)];
            // Where a mismatch at this point falls back to: the target the
            // previous row had for this symbol before it advances to
            // `state`.
            let fallback = transitions[state - 1][column];
            transitions[state - 1][column] = state;
            let row = transitions[fallback].clone();
            transitions[state] = row;
        }

        Fsa {
            transitions,
            columns,
            width: pattern.width(),
            pattern_len: m,
        }
    }

    /// The number of pattern symbols.
    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }

    /// Scans `text` and returns the start position of every occurrence, in
    /// text order.
    pub fn find_all(&self, text: &WordVector) -> Result<Vec<usize>> {
        if text.width() != self.width && !text.is_empty() && self.pattern_len > 0 {
            return Err(Error::WidthMismatch {
                text: text.width(),
                pattern: self.width,
            });
        }
        let mut occurrences = Vec::new();
        if self.pattern_len == 0 || self.pattern_len > text.len() {
            return Ok(occurrences);
        }
        let mut state = 0;
        for (i, symbol) in text.iter().enumerate() {
            state = match self.columns.get(&symbol) {
                Some(&column) => self.transitions[state][column],
                None => 0,
            };
            if state == self.pattern_len {
                occurrences.push(i + 1 - self.pattern_len);
            }
        }
        Ok(occurrences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    fn encoded_pair(text: &[u8], pattern: &[u8]) -> (WordVector, Option<WordVector>) {
        let (alphabet, encoded) = alphabet::encode(text);
        (encoded, alphabet::encode_with(pattern, &alphabet))
    }

    #[test]
    fn test_repeated_occurrences() {
        let (text, pattern) = encoded_pair(b"abababcabab", b"ab");
        let fsa = Fsa::new(&pattern.unwrap());
        assert_eq!(fsa.find_all(&text).unwrap(), vec![0, 2, 4, 7, 9]);
    }

    #[test]
    fn test_single_occurrence() {
        let (text, pattern) = encoded_pair(b"Hello, world!", b"world");
        let fsa = Fsa::new(&pattern.unwrap());
        assert_eq!(fsa.find_all(&text).unwrap(), vec![7]);
    }

    #[test]
    fn test_overlapping_occurrences() {
        let (text, pattern) = encoded_pair(b"aaaa", b"aaa");
        let fsa = Fsa::new(&pattern.unwrap());
        assert_eq!(fsa.find_all(&text).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_self_overlapping_pattern() {
        let (text, pattern) = encoded_pair(b"abababab", b"abab");
        let fsa = Fsa::new(&pattern.unwrap());
        assert_eq!(fsa.find_all(&text).unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn test_no_occurrence() {
        // The pattern shares the text's alphabet but never occurs.
        let (alphabet, text) = alphabet::encode(b"xyzxyzabc");
        let pattern = alphabet::encode_with(b"zya", &alphabet).unwrap();
        let fsa = Fsa::new(&pattern);
        assert_eq!(fsa.find_all(&text).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_unknown_symbol_resets() {
        // Pattern symbols drawn from a wider alphabet than the pattern
        // itself uses: the scan must reset on the symbols the lookup lacks.
        let (alphabet, text) = alphabet::encode(b"abcabcab");
        let pattern = alphabet::encode_with(b"ab", &alphabet).unwrap();
        let fsa = Fsa::new(&pattern);
        assert_eq!(fsa.find_all(&text).unwrap(), vec![0, 3, 6]);
    }

    #[test]
    fn test_pattern_longer_than_text() {
        let (text, _) = encoded_pair(b"a", b"");
        let pattern = WordVector::from_words(&[0, 0, 0], 1).unwrap();
        let fsa = Fsa::new(&pattern);
        assert_eq!(fsa.find_all(&text).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_width_mismatch() {
        let pattern = WordVector::from_words(&[1, 2], 4).unwrap();
        let text = WordVector::from_words(&[1, 2, 1, 2], 3).unwrap();
        let fsa = Fsa::new(&pattern);
        assert_eq!(
            fsa.find_all(&text),
            Err(Error::WidthMismatch {
                text: 3,
                pattern: 4
            })
        );
    }
}
