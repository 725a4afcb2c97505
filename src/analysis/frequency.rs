// Word frequency counting: per episode and season-wide.
//
// FrequencyTable is an insertion-ordered multiset: ranking sorts by count
// descending with a stable sort, so ties keep first-encountered order and
// every run over the same input ranks identically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ordered word -> count tally. Serializes as a list of (word, count) pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, usize)>", into = "Vec<(String, usize)>")]
pub struct FrequencyTable {
    /// (word, count) in first-seen order
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for FrequencyTable {}

impl From<Vec<(String, usize)>> for FrequencyTable {
    fn from(entries: Vec<(String, usize)>) -> Self {
        let mut table = Self::new();
        for (word, count) in entries {
            table.add(&word, count);
        }
        table
    }
}

impl From<FrequencyTable> for Vec<(String, usize)> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token, duplicates included.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for token in tokens {
            table.add(token.as_ref(), 1);
        }
        table
    }

    pub fn add(&mut self, word: &str, count: usize) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), count));
            }
        }
    }

    /// Add every count of `other` into this table.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (word, count) in &other.entries {
            self.add(word, *count);
        }
    }

    /// Count for a word, 0 if it never appeared.
    pub fn get(&self, word: &str) -> usize {
        self.index.get(word).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Every entry, count descending; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Lexical statistics for one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub episode_id: String,
    /// Every surviving lemma, duplicates included
    pub total_words: usize,
    /// Distinct lemmas
    pub unique_words: usize,
    /// unique_words / total_words, 0 when there are no words
    pub lexical_density: f64,
    pub word_count: FrequencyTable,
    /// Top-N lemmas, count descending, ties in first-seen order
    pub top_words: Vec<(String, usize)>,
}

impl EpisodeStats {
    /// Compute stats from an episode's normalized tokens.
    pub fn from_tokens(episode_id: impl Into<String>, tokens: &[String], top_n: usize) -> Self {
        let word_count = FrequencyTable::from_tokens(tokens);
        Self::from_counts(episode_id, word_count, top_n)
    }

    pub fn from_counts(episode_id: impl Into<String>, word_count: FrequencyTable, top_n: usize) -> Self {
        let total_words = word_count.total();
        let unique_words = word_count.len();
        Self {
            episode_id: episode_id.into(),
            total_words,
            unique_words,
            lexical_density: lexical_density(unique_words, total_words),
            top_words: word_count.top(top_n),
            word_count,
        }
    }

    /// Stats for an episode that produced no words (unreadable file, etc.).
    pub fn empty(episode_id: impl Into<String>) -> Self {
        Self::from_counts(episode_id, FrequencyTable::new(), 0)
    }
}

pub fn lexical_density(unique_words: usize, total_words: usize) -> f64 {
    if total_words == 0 {
        0.0
    } else {
        unique_words as f64 / total_words as f64
    }
}

/// Fold per-episode counts into one season-wide table.
///
/// Counts are a plain sum, so the result's counts don't depend on episode
/// order; only tie order in rankings does.
pub fn global_frequencies<'a, I>(episodes: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a EpisodeStats>,
{
    episodes
        .into_iter()
        .fold(FrequencyTable::new(), |mut acc, episode| {
            acc.merge(&episode.word_count);
            acc
        })
}
