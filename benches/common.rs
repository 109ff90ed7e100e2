use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use text_index::WordVector;

/// A sentinel-terminated text over a four-symbol alphabet, packed three
/// bits wide. Deterministic across runs.
pub fn dna_text(len: usize) -> WordVector {
    let mut rng: StdRng = SeedableRng::from_seed([0; 32]);
    let mut words: Vec<u64> = (0..len).map(|_| rng.gen_range(1..=4u64)).collect();
    words.push(0);
    WordVector::from_words(&words, 3).expect("width is in range")
}

#[allow(dead_code)]
pub fn dna_patterns(count: usize, len: usize) -> Vec<WordVector> {
    let mut rng: StdRng = SeedableRng::from_seed([7; 32]);
    (0..count)
        .map(|_| {
            let words: Vec<u64> = (0..len).map(|_| rng.gen_range(1..=4u64)).collect();
            WordVector::from_words(&words, 3).expect("width is in range")
        })
        .collect()
}
