use crate::error::{Error, Result};
use crate::suffix_array::SuffixArray;
use crate::util;
use crate::wavelet_matrix::WaveletMatrix;
use crate::word_vector::WordVector;

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// An FM-index: the Burrows-Wheeler transform of a sentinel-terminated
/// text held in a [`WaveletMatrix`], plus the cumulative symbol counts
/// needed for backward search.
///
/// `occ` stores the last column `L` of the sorted rotation matrix
/// (`L[r] = text[(SA[r] - 1) mod n]`), so `occ.rank(c, i)` counts the
/// occurrences of `c` in `L[0..=i]` in `O(width)`. `counts[c]` is the
/// number of text symbols strictly smaller than `c`. Together they drive
/// `backward_extend`, which narrows a suffix-array interval by one pattern
/// symbol per step.
///
/// The count table is dense with `2^width` entries, so the index is meant
/// for alphabet-encoded texts whose width is `ceil(log2(sigma))`, not for
/// raw 64-bit values.
#[derive(Clone, Serialize, Deserialize)]
pub struct FmIndex {
    occ: WaveletMatrix,
    counts: Vec<usize>,
    len: usize,
    width: usize,
}

impl FmIndex {
    /// Builds the index from a sentinel-terminated text, constructing the
    /// suffix array internally.
    pub fn new(text: &WordVector) -> Result<FmIndex> {
        let sa = SuffixArray::new(text)?;
        Self::with_suffix_array(text, &sa)
    }

    /// Builds the index from a text and its previously built suffix array.
    ///
    /// The text must end with exactly one occurrence of the smallest
    /// symbol 0 (the `$` sentinel); anything else is
    /// [`Error::MalformedInput`]. The suffix array must index this very
    /// text, which is checked by length.
    pub fn with_suffix_array(text: &WordVector, sa: &SuffixArray) -> Result<FmIndex> {
        let n = text.len();
        if n == 0 || text.get_unchecked(n - 1) != 0 {
            return Err(Error::MalformedInput(
                "the text must end with the sentinel symbol 0".to_string(),
            ));
        }
        if text.iter().take(n - 1).any(|c| c == 0) {
            return Err(Error::MalformedInput(
                "the sentinel symbol 0 must be unique".to_string(),
            ));
        }
        if sa.len() != n {
            return Err(Error::LengthMismatch {
                left: n,
                right: sa.len(),
            });
        }

        let width = text.width();
        let mut last_column = WordVector::new_unchecked(n, width);
        for r in 0..n {
            let position = util::modular_sub(sa.get_unchecked(r), 1, n);
            last_column.set_unchecked(r, text.get_unchecked(position));
        }
        let occ = WaveletMatrix::new(&last_column);

        let sigma = 1usize
            .checked_shl(width as u32)
            .ok_or(Error::InvalidWidth { width })?;
        let mut counts = vec![0usize; sigma];
        for c in 1..sigma {
            counts[c] = counts[c - 1] + occ.rank(c as u64 - 1, n - 1);
        }

        Ok(FmIndex {
            occ,
            counts,
            len: n,
            width,
        })
    }

    /// The indexed text length, sentinel included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The element width of the indexed text, in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The BWT symbol at suffix-array rank `rank`, in `O(width)`.
    pub fn access(&self, rank: usize) -> Result<u64> {
        self.occ.access(rank)
    }

    // Maps a BWT row to the row of the text position one step earlier.
    fn lf_map(&self, rank: usize) -> usize {
        let symbol = self.occ.access_unchecked(rank);
        self.counts[symbol as usize] + self.occ.rank(symbol, rank) - 1
    }

    /// Iterates backwards through the text from the suffix at `rank`,
    /// yielding the BWT symbol of each step, i.e. the symbols preceding
    /// that suffix in reverse text order. The iteration cycles through the
    /// sentinel, so callers bound it by taking at most `len()` symbols.
    pub fn iter_backward(&self, rank: usize) -> Result<BackwardIter<'_>> {
        if rank >= self.len {
            return Err(Error::OutOfRange {
                index: rank,
                len: self.len,
            });
        }
        Ok(BackwardIter { index: self, rank })
    }

    /// Extends the suffix-array interval `[begin, end)` backwards by one
    /// pattern symbol. An empty interval stays empty; a symbol outside the
    /// alphabet yields an empty interval.
    pub fn backward_extend(&self, begin: usize, end: usize, symbol: u64) -> (usize, usize) {
        if symbol as usize >= self.counts.len() {
            return (0, 0);
        }
        let base = self.counts[symbol as usize];
        let new_begin = base
            + if begin > 0 {
                self.occ.rank(symbol, begin - 1)
            } else {
                0
            };
        let new_end = base
            + if end > 0 {
                self.occ.rank(symbol, end - 1)
            } else {
                0
            };
        (new_begin, new_end)
    }

    /// Backward search: the half-open interval of suffix-array ranks whose
    /// suffixes start with `pattern`. An empty interval means no
    /// occurrence.
    pub fn search(&self, pattern: &WordVector) -> Result<Range<usize>> {
        if pattern.width() != self.width && !pattern.is_empty() {
            return Err(Error::WidthMismatch {
                text: self.width,
                pattern: pattern.width(),
            });
        }
        let mut begin = 0;
        let mut end = self.len;
        for j in (0..pattern.len()).rev() {
            (begin, end) = self.backward_extend(begin, end, pattern.get_unchecked(j));
            if begin == end {
                return Ok(begin..begin);
            }
        }
        Ok(begin..end)
    }

    /// The suffix-array positions of all occurrences of `pattern`, in
    /// suffix-array order.
    pub fn locate(&self, pattern: &WordVector) -> Result<Vec<usize>> {
        Ok(self.search(pattern)?.collect())
    }

    /// The text positions of all occurrences of `pattern`, mapped through
    /// `sa`. No sort order is guaranteed beyond the suffix-array range
    /// order.
    pub fn locate_with_sa(&self, pattern: &WordVector, sa: &SuffixArray) -> Result<Vec<usize>> {
        if sa.len() != self.len {
            return Err(Error::LengthMismatch {
                left: self.len,
                right: sa.len(),
            });
        }
        Ok(self
            .search(pattern)?
            .map(|rank| sa.get_unchecked(rank))
            .collect())
    }
}

/// An iterator walking backwards through the indexed text by repeated
/// LF-mapping.
pub struct BackwardIter<'a> {
    index: &'a FmIndex,
    rank: usize,
}

impl Iterator for BackwardIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let symbol = self.index.occ.access_unchecked(self.rank);
        self.rank = self.index.lf_map(self.rank);
        Some(symbol)
    }
}
