use text_index::WordVector;

/// A search index that scans the text for every query. Slow, obviously
/// correct, and the baseline every succinct structure is compared against.
pub struct NaiveSearchIndex {
    words: Vec<u64>,
}

impl NaiveSearchIndex {
    pub fn new(text: &WordVector) -> NaiveSearchIndex {
        NaiveSearchIndex {
            words: text.iter().collect(),
        }
    }

    /// Start positions of every occurrence of `pattern`, in text order.
    pub fn search(&self, pattern: &WordVector) -> Vec<usize> {
        let pattern: Vec<u64> = pattern.iter().collect();
        if pattern.is_empty() || pattern.len() > self.words.len() {
            return Vec::new();
        }
        (0..=self.words.len() - pattern.len())
            .filter(|&i| self.words[i..i + pattern.len()] == pattern[..])
            .collect()
    }
}
