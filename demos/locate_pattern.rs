//! Encode a text, build its suffix array and FM-index, and locate a
//! pattern.

use text_index::{alphabet, FmIndex, SuffixArray};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = b"how much wood would a woodchuck chuck$";
    let pattern = b"wood";

    let (alphabet, encoded) = alphabet::encode(text);
    let sa = SuffixArray::new(&encoded)?;
    let index = FmIndex::with_suffix_array(&encoded, &sa)?;

    let encoded_pattern =
        alphabet::encode_with(pattern, &alphabet).expect("pattern uses the text's alphabet");
    let mut positions = index.locate_with_sa(&encoded_pattern, &sa)?;
    positions.sort_unstable();

    println!(
        "{:?} occurs in {:?} at {:?}",
        String::from_utf8_lossy(pattern),
        String::from_utf8_lossy(text),
        positions
    );
    Ok(())
}
