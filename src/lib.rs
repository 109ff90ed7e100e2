//! Succinct text indexing built from first principles: bit-packed vectors,
//! constant-time rank with logarithmic select, a wavelet matrix, linear-time
//! suffix-array construction (DC3/skew), and an FM-index with backward
//! search on top of them.
//!
//! The layers interlock bottom-up: the wavelet matrix answers `rank`
//! through [`RankSupport`] over a [`Bitvector`], the suffix array packs its
//! indices into a [`WordVector`], and [`FmIndex`] combines both to locate
//! patterns without ever materialising the text again.

#![allow(clippy::len_without_is_empty)]

pub mod alphabet;
mod bits;
mod bitvector;
mod error;
mod fm_index;
mod fsa;
mod rank;
mod suffix_array;
#[cfg(test)]
mod testutil;
mod util;
mod wavelet_matrix;
mod word_vector;

pub use crate::bitvector::{BitCursorMut, BitMut, Bits, Bitvector};
pub use crate::error::{Error, Result};
pub use crate::fm_index::{BackwardIter, FmIndex};
pub use crate::fsa::Fsa;
pub use crate::rank::RankSupport;
pub use crate::suffix_array::SuffixArray;
pub use crate::wavelet_matrix::WaveletMatrix;
pub use crate::word_vector::{WordCursorMut, WordRef, WordRefMut, WordVector, Words};

pub use crate::alphabet::Alphabet;
