use crate::word_vector::WordVector;

use num_traits::Zero;

/// Build a sentinel-terminated symbol sequence for tests using a generator
/// function `gen`. The generated symbols are non-zero; a single zero is
/// appended as the sentinel.
pub fn build_text<C: Zero + Clone, F: FnMut() -> C>(mut gen: F, len: usize) -> Vec<C> {
    let mut text = Vec::with_capacity(len + 1);
    for _ in 0..len {
        let mut c = gen();
        while c.is_zero() {
            c = gen();
        }
        text.push(c);
    }
    text.push(C::zero());
    text
}

/// Pack a symbol sequence into a [`WordVector`] wide enough for its largest
/// value.
pub fn pack(words: &[u64]) -> WordVector {
    let max = words.iter().copied().max().unwrap_or(0);
    let width = crate::bits::bits_to_store(max).max(1);
    WordVector::from_words(words, width).expect("width is in range")
}

/// Count occurrences of `symbol` in `words[0..=index]` the slow way.
pub fn naive_rank(words: &[u64], symbol: u64, index: usize) -> usize {
    words
        .iter()
        .take(index + 1)
        .filter(|&&w| w == symbol)
        .count()
}
