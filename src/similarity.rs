//! Edit-distance similarity between normalized names.
//!
//! Screening candidates that survive the Aho-Corasick pass are compared
//! against watchlist forms with plain Levenshtein distance. Thresholds and
//! weighting live in the screening layer, not here.
//!
//! Distances are computed over **Unicode scalar values** (`char`), not bytes,
//! so Cyrillic and Latin spellings of the same length score the same way.

/// Levenshtein edit distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };
    if short.is_empty() {
        return long.len();
    }

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current = vec![0usize; short.len() + 1];
    for (i, lc) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let insertions = previous[j + 1] + 1;
            let deletions = current[j] + 1;
            let substitutions = previous[j] + usize::from(lc != sc);
            current[j + 1] = insertions.min(deletions).min(substitutions);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[short.len()]
}

/// Edit-distance similarity in \([0, 1]\): `1 − distance / max_len`.
/// Both sides should already be normalized; this function does not lowercase.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (1.0 - distance as f64 / max_len as f64).max(0.0)
}
