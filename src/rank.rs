use crate::bits;
use crate::bitvector::Bitvector;
use crate::error::{Error, Result};
use crate::word_vector::WordVector;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Constant-time `rank` and logarithmic `select` over a [`Bitvector`].
///
/// The helper takes ownership of the bitvector it indexes, so the indexed
/// bits cannot change underneath the precomputed counts; the bits stay
/// readable through [`RankSupport::bitvector`].
///
/// Two count layers are kept packed in [`WordVector`]s: `cum_large[j]`
/// counts the 1-bits before the `j`-th large block, and `cum_small[k]`
/// counts the 1-bits from the enclosing large-block boundary up to the
/// `k`-th small block. The remainder inside a small block is answered by a
/// table mapping every realised `block_small - 1`-bit slice to its prefix
/// popcounts; queries whose slice would run past the end of the bitvector
/// fall back to a bounded naive count.
#[derive(Clone, Serialize, Deserialize)]
pub struct RankSupport {
    bits: Bitvector,
    block_small: usize,
    block_large: usize,
    cum_large: WordVector,
    cum_small: WordVector,
    popcounts: HashMap<Bitvector, WordVector>,
}

impl RankSupport {
    /// Builds the count layers and the popcount table for `bits`.
    pub fn new(bits: Bitvector) -> RankSupport {
        let n = bits.len();
        // block_small = ceil(log2(n) / 2), block_large = block_small^2.
        // Clamped so the slice length block_small - 1 never degenerates.
        let block_small = bits::ceil_log2(n).div_ceil(2).max(2);
        let block_large = block_small * block_small;

        let mut cum_large = WordVector::new_unchecked(
            n / block_large + 1,
            bits::bits_to_store(n as u64).max(1),
        );
        let mut cum_small = WordVector::new_unchecked(
            n / block_small + 1,
            bits::bits_to_store(block_large as u64),
        );

        let mut total = 0u64; // 1-bits in [0, i)
        let mut in_large = 0u64; // 1-bits since the current large block began
        for i in 0..n {
            if i % block_large == 0 {
                cum_large.set_unchecked(i / block_large, total);
                in_large = 0;
            }
            if i % block_small == 0 {
                cum_small.set_unchecked(i / block_small, in_large);
            }
            if bits.bit(i) {
                total += 1;
                in_large += 1;
            }
        }

        let slice_len = block_small - 1;
        let prefix_width = bits::bits_to_store(slice_len as u64).max(1);
        let mut popcounts: HashMap<Bitvector, WordVector> = HashMap::new();
        let mut start = 0;
        while start + slice_len <= n {
            let key = bits.slice_range(start, slice_len);
            popcounts.entry(key).or_insert_with_key(|key| {
                let mut prefix = WordVector::new_unchecked(slice_len, prefix_width);
                let mut ones = 0u64;
                for j in 0..slice_len {
                    if key.bit(j) {
                        ones += 1;
                    }
                    prefix.set_unchecked(j, ones);
                }
                prefix
            });
            start += block_small;
        }

        RankSupport {
            bits,
            block_small,
            block_large,
            cum_large,
            cum_small,
            popcounts,
        }
    }

    /// The indexed bits.
    pub fn bitvector(&self) -> &Bitvector {
        &self.bits
    }

    /// The number of indexed bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.bits.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.bits.len(),
            })
        }
    }

    /// The number of 1-bits in `[0, index]`.
    pub fn rank1(&self, index: usize) -> Result<usize> {
        self.check(index)?;
        Ok(self.rank1_internal(index))
    }

    /// The number of `value`-bits in `[0, index]`.
    pub fn rank_bit(&self, index: usize, value: bool) -> Result<usize> {
        self.check(index)?;
        Ok(self.rank_bit_internal(index, value))
    }

    /// The number of `value`-bits in `[from, to]`, both ends inclusive.
    /// An inverted range counts as empty.
    pub fn rank_range(&self, from: usize, to: usize, value: bool) -> Result<usize> {
        self.check(to)?;
        Ok(self.rank_range_internal(from, to, value))
    }

    /// The position of the `k`-th (1-based) `value`-bit, or `None` when
    /// fewer than `k` such bits exist. Binary search over `rank_bit`, so
    /// `O(log n)`.
    pub fn select(&self, k: usize, value: bool) -> Option<usize> {
        let n = self.bits.len();
        if n == 0 || k == 0 || k > self.rank_bit_internal(n - 1, value) {
            return None;
        }
        let mut lo = 0;
        let mut hi = n - 1;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.rank_bit_internal(mid, value) < k {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Some(lo)
    }

    pub(crate) fn rank1_internal(&self, index: usize) -> usize {
        debug_assert!(index < self.bits.len());
        let block = index / self.block_small;
        let base = self.cum_large.get_unchecked(index / self.block_large) as usize
            + self.cum_small.get_unchecked(block) as usize;
        let start = block * self.block_small;
        let offset = index - start;
        let slice_len = self.block_small - 1;
        if offset < slice_len && start + slice_len <= self.bits.len() {
            let key = self.bits.slice_range(start, slice_len);
            if let Some(prefix) = self.popcounts.get(&key) {
                return base + prefix.get_unchecked(offset) as usize;
            }
        }
        // Trailing fragment, or the last position of a small block: count
        // the at most block_small remaining bits directly.
        base + (start..=index).filter(|&j| self.bits.bit(j)).count()
    }

    #[inline]
    pub(crate) fn rank_bit_internal(&self, index: usize, value: bool) -> usize {
        if value {
            self.rank1_internal(index)
        } else {
            index + 1 - self.rank1_internal(index)
        }
    }

    pub(crate) fn rank_range_internal(&self, from: usize, to: usize, value: bool) -> usize {
        if from > to {
            return 0;
        }
        let upto = self.rank_bit_internal(to, value);
        if from == 0 {
            upto
        } else {
            upto.saturating_sub(self.rank_bit_internal(from - 1, value))
        }
    }
}
