//! Suffix array construction over packed texts.
//!
//! The main constructor is the linear-time DC3/skew algorithm of
//! Kärkkäinen & Sanders: sort the suffixes starting at positions `i % 3 != 0`
//! by recursing on a string of triple names, then radix-sort the `i % 3 == 0`
//! suffixes and merge. A naive `O(n^2 log n)` constructor is kept as a
//! baseline; both produce identical output.

use crate::bits;
use crate::error::{Error, Result};
use crate::word_vector::WordVector;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The suffix array of a packed text: element `r` is the starting position
/// of the `r`-th lexicographically smallest suffix, stored in a
/// [`WordVector`] of width `ceil(log2(n))`.
///
/// Suffix comparison treats positions past the end as the symbol 0, so a
/// suffix that is a proper prefix of another sorts first. The symbol 0
/// itself may therefore occur only as the final symbol of the text (the
/// `$` sentinel); anywhere else it would collide with the virtual padding
/// and the constructors reject it as [`Error::MalformedInput`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixArray {
    sa: WordVector,
}

impl SuffixArray {
    /// Builds the suffix array with the DC3/skew algorithm, linear in the
    /// text length plus the alphabet size.
    pub fn new(text: &WordVector) -> Result<SuffixArray> {
        let symbols = validate(text)?;
        let max_symbol = symbols.iter().copied().max().unwrap_or(0);
        let sa = skew(&symbols, max_symbol);
        Ok(Self::pack(&sa))
    }

    /// Builds the suffix array by sorting suffix positions with a pairwise
    /// comparison. Quadratic in the worst case; used as a baseline and for
    /// small inputs.
    pub fn new_naive(text: &WordVector) -> Result<SuffixArray> {
        let symbols = validate(text)?;
        let mut order: Vec<usize> = (0..symbols.len()).collect();
        order.sort_by(|&a, &b| compare_suffixes(&symbols, a, b));
        Ok(Self::pack(&order))
    }

    fn pack(sa: &[usize]) -> SuffixArray {
        let n = sa.len();
        let width = bits::bits_to_store(n.saturating_sub(1) as u64).max(1);
        let mut packed = WordVector::new_unchecked(n, width);
        for (rank, &position) in sa.iter().enumerate() {
            packed.set_unchecked(rank, position as u64);
        }
        SuffixArray { sa: packed }
    }

    /// The number of suffixes.
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    /// The text position of the suffix with lexicographic rank `rank`.
    pub fn get(&self, rank: usize) -> Result<usize> {
        Ok(self.sa.get(rank)? as usize)
    }

    #[inline]
    pub(crate) fn get_unchecked(&self, rank: usize) -> usize {
        self.sa.get_unchecked(rank) as usize
    }

    /// Iterates over the suffix positions in rank order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.sa.iter().map(|v| v as usize)
    }

    /// The packed index storage.
    pub fn as_words(&self) -> &WordVector {
        &self.sa
    }
}

fn validate(text: &WordVector) -> Result<Vec<usize>> {
    let symbols: Vec<usize> = text.iter().map(|v| v as usize).collect();
    let interior = symbols.len().saturating_sub(1);
    if let Some(position) = symbols[..interior].iter().position(|&c| c == 0) {
        return Err(Error::MalformedInput(format!(
            "symbol 0 is reserved for the sentinel and may only end the text, found it at {}",
            position
        )));
    }
    Ok(symbols)
}

fn compare_suffixes(symbols: &[usize], a: usize, b: usize) -> Ordering {
    let n = symbols.len();
    let mut i = a;
    let mut j = b;
    // The bounds guards are redundant when the text carries a unique
    // smallest sentinel, but stay as a safety net for zero-free texts.
    while i < n && j < n && symbols[i] == symbols[j] {
        i += 1;
        j += 1;
    }
    match (i == n, j == n) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => symbols[i].cmp(&symbols[j]),
    }
}

fn skew(text: &[usize], max_symbol: usize) -> Vec<usize> {
    match text.len() {
        0 => Vec::new(),
        1 => vec![0],
        n => {
            let mut s = Vec::with_capacity(n + 3);
            s.extend_from_slice(text);
            s.extend_from_slice(&[0, 0, 0]);
            let mut sa = vec![0usize; n];
            skew_rec(&s, &mut sa, max_symbol);
            sa
        }
    }
}

/// Core of the skew algorithm. `s` is a string over `[0, max_symbol]`
/// followed by three 0 sentinels; `sa` receives the suffix array of the
/// `s.len() - 3` real positions.
fn skew_rec(s: &[usize], sa: &mut [usize], max_symbol: usize) {
    let n = s.len() - 3;
    debug_assert!(n >= 2);
    let n0 = (n + 2) / 3;
    let n1 = (n + 1) / 3;
    let n2 = n / 3;
    let n02 = n0 + n2;

    // Positions with i % 3 != 0, plus one dummy mod-1 position at `n` when
    // n % 3 == 1, so that every mod-1 slot has a successor rank to merge on.
    let mut s12: Vec<usize> = Vec::with_capacity(n02 + 3);
    for i in 0..n + (n0 - n1) {
        if i % 3 != 0 {
            s12.push(i);
        }
    }
    s12.extend_from_slice(&[0, 0, 0]);
    let mut sa12 = vec![0usize; n02 + 3];

    // LSD radix sort of the (s[i], s[i+1], s[i+2]) triples.
    radix_pass(&s12[..n02], &mut sa12[..n02], s, 2, max_symbol);
    radix_pass(&sa12[..n02], &mut s12[..n02], s, 1, max_symbol);
    radix_pass(&s12[..n02], &mut sa12[..n02], s, 0, max_symbol);

    // Name the triples in lexicographic order, 1-based. Equal triples get
    // equal names. The rank array layout puts mod-1 positions in the first
    // n0 slots and mod-2 positions in the next n2, in positional order.
    let mut name = 0usize;
    let mut prev = (usize::MAX, usize::MAX, usize::MAX);
    for &i in &sa12[..n02] {
        let triple = (s[i], s[i + 1], s[i + 2]);
        if triple != prev {
            name += 1;
            prev = triple;
        }
        if i % 3 == 1 {
            s12[i / 3] = name;
        } else {
            s12[i / 3 + n0] = name;
        }
    }

    if name < n02 {
        // Names are not yet unique: recurse on the name string to sort the
        // mod-1/2 suffixes, then replace the names by unique ranks.
        let mut names = Vec::with_capacity(n02 + 3);
        names.extend_from_slice(&s12[..n02]);
        names.extend_from_slice(&[0, 0, 0]);
        skew_rec(&names, &mut sa12[..n02], name);
        for i in 0..n02 {
            s12[sa12[i]] = i + 1;
        }
    } else {
        // Names are unique: the suffix array is the inverse permutation.
        for i in 0..n02 {
            sa12[s12[i] - 1] = i;
        }
    }

    // Stably sort the mod-0 suffixes by first symbol, ties broken by the
    // rank of the following mod-1 suffix (already in sa12 order).
    let mut s0 = Vec::with_capacity(n0);
    for &slot in &sa12[..n02] {
        if slot < n0 {
            s0.push(3 * slot);
        }
    }
    let mut sa0 = vec![0usize; n0];
    radix_pass(&s0, &mut sa0, s, 0, max_symbol);

    // Merge. A mod-1 suffix compares by (symbol, rank of successor); a
    // mod-2 suffix needs two symbols before its successor rank is defined.
    let position_of = |slot: usize| -> usize {
        if slot < n0 {
            slot * 3 + 1
        } else {
            (slot - n0) * 3 + 2
        }
    };
    let mut p = 0; // next mod-0 entry
    let mut t = n0 - n1; // next mod-1/2 entry; skips the dummy slot
    let mut k = 0;
    while k < n {
        if t == n02 {
            sa[k] = sa0[p];
            p += 1;
            k += 1;
            continue;
        }
        if p == n0 {
            sa[k] = position_of(sa12[t]);
            t += 1;
            k += 1;
            continue;
        }
        let slot = sa12[t];
        let i = position_of(slot);
        let j = sa0[p];
        let take12 = if slot < n0 {
            (s[i], s12[slot + n0]) <= (s[j], s12[j / 3])
        } else {
            (s[i], s[i + 1], s12[slot - n0 + 1]) <= (s[j], s[j + 1], s12[j / 3 + n0])
        };
        if take12 {
            sa[k] = i;
            t += 1;
        } else {
            sa[k] = j;
            p += 1;
        }
        k += 1;
    }
}

/// One stable counting-sort pass: orders the positions in `src` by the key
/// `s[position + shift]` into `dst`. Keys are in `[0, max_symbol]`.
fn radix_pass(src: &[usize], dst: &mut [usize], s: &[usize], shift: usize, max_symbol: usize) {
    let mut buckets = vec![0usize; max_symbol + 1];
    for &i in src {
        buckets[s[i + shift]] += 1;
    }
    let mut sum = 0;
    for bucket in buckets.iter_mut() {
        let count = *bucket;
        *bucket = sum;
        sum += count;
    }
    for &i in src {
        let key = s[i + shift];
        dst[buckets[key]] = i;
        buckets[key] += 1;
    }
}
