//! Edit distance
//!
//! Classic dynamic-programming Levenshtein distance over case-normalized
//! input, plus the similarity score used for ranking.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for comparison: Unicode NFC, then lowercase.
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Levenshtein distance between `a` and `b`, case-insensitive.
///
/// Insertion, deletion, and substitution each cost 1. Runs in
/// O(len(a) * len(b)) time with a two-row matrix.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b.len()]
}

/// Similarity score for ranking: `100 - distance`.
///
/// Negative for very dissimilar long strings; ranking tolerates that
/// without special-casing.
pub fn similarity(a: &str, b: &str) -> i64 {
    100 - distance(a, b) as i64
}
