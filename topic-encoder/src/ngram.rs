/// Window sizes for character n-gram extraction
pub const NGRAM_RANGE: (usize, usize) = (2, 4);

///
/// Lowercase character n-grams of a label, whitespace included, over
/// every window size in `NGRAM_RANGE`. A label shorter than the
/// smallest window yields nothing.
///
pub fn char_ngrams(label: &str) -> Vec<Box<str>> {
    let lower = label.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    let (lo, hi) = NGRAM_RANGE;
    let mut grams = vec![];

    for n in lo..=hi {
        if chars.len() < n {
            break;
        }
        for window in chars.windows(n) {
            grams.push(window.iter().collect::<String>().into_boxed_str());
        }
    }
    grams
}
