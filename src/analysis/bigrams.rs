// Bigram extraction over per-episode top-word lists.
//
// Pairs are adjacent entries of each episode's ranked top list, not adjacent
// words in the dialogue: the result says which frequent words rank next to
// each other, not which words co-occur in speech.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::frequency::EpisodeStats;

/// An ordered word pair and how many times it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bigram {
    pub pair: (String, String),
    pub count: usize,
}

impl Bigram {
    pub fn label(&self) -> String {
        format!("{} {}", self.pair.0, self.pair.1)
    }
}

/// Count adjacent pairs of every episode's top-word list.
///
/// Results are count descending; equal counts keep first-seen order.
pub fn extract_bigrams(episodes: &[EpisodeStats]) -> Vec<Bigram> {
    let lists: Vec<Vec<&str>> = episodes
        .iter()
        .map(|e| e.top_words.iter().map(|(w, _)| w.as_str()).collect())
        .collect();
    bigrams_from_lists(&lists)
}

/// Same counting over plain word lists.
pub fn bigrams_from_lists<S: AsRef<str>>(lists: &[Vec<S>]) -> Vec<Bigram> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut bigrams: Vec<Bigram> = Vec::new();

    for list in lists {
        for window in list.windows(2) {
            let pair = (window[0].as_ref().to_string(), window[1].as_ref().to_string());
            match index.get(&pair) {
                Some(&i) => bigrams[i].count += 1,
                None => {
                    index.insert(pair.clone(), bigrams.len());
                    bigrams.push(Bigram { pair, count: 1 });
                }
            }
        }
    }

    // Stable: equal counts keep first-seen order
    bigrams.sort_by(|a, b| b.count.cmp(&a.count));
    bigrams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_counts_across_episodes() {
        let bigrams = bigrams_from_lists(&lists(&[&["fear", "dark", "fear"], &["dark", "fear"]]));
        assert_eq!(bigrams.len(), 2);
        assert_eq!(bigrams[0].label(), "dark fear");
        assert_eq!(bigrams[0].count, 2);
        assert_eq!(bigrams[1].label(), "fear dark");
        assert_eq!(bigrams[1].count, 1);
    }

    #[test]
    fn test_short_lists_yield_nothing() {
        assert!(bigrams_from_lists(&lists(&[&["alone"], &[]])).is_empty());
    }

    #[test]
    fn test_pairs_are_ordered() {
        let bigrams = bigrams_from_lists(&lists(&[&["a", "b"], &["b", "a"]]));
        assert_eq!(bigrams.len(), 2);
        assert!(bigrams.iter().all(|b| b.count == 1));
        assert_eq!(bigrams[0].label(), "a b");
    }

    #[test]
    fn test_words_keep_every_character() {
        let bigrams = bigrams_from_lists(&lists(&[&["caf\u{e9}", "tab\tbed"]]));
        assert_eq!(bigrams.len(), 1);
        assert_eq!(bigrams[0].pair, ("caf\u{e9}".to_string(), "tab\tbed".to_string()));
    }

    #[test]
    fn test_uses_top_word_order() {
        let tokens: Vec<String> = ["town", "town", "fear"].iter().map(|s| s.to_string()).collect();
        let episode = EpisodeStats::from_tokens("01", &tokens, 15);
        let bigrams = extract_bigrams(&[episode]);
        assert_eq!(bigrams[0].pair, ("town".to_string(), "fear".to_string()));
    }
}
