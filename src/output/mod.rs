// Output formatting: terminal display and report generation.

pub mod markdown;
pub mod terminal;

use crate::analysis::frequency::FrequencyTable;

/// Prepare the word -> weight list a word-cloud renderer consumes.
///
/// Drops numeric-only words and words shorter than `min_len` characters.
/// Returns None when nothing survives, so callers can tell "no valid input"
/// apart from a cloud with few words.
pub fn cloud_weights(table: &FrequencyTable, min_len: usize) -> Option<Vec<(String, usize)>> {
    let weights: Vec<(String, usize)> = table
        .ranked()
        .into_iter()
        .filter(|(word, count)| {
            *count > 0
                && word.chars().count() >= min_len
                && !word.chars().all(|c| c.is_ascii_digit())
        })
        .collect();

    if weights.is_empty() {
        None
    } else {
        Some(weights)
    }
}
