// Semantic evolution: per-episode usage trajectories of the season's
// most frequent words.

use serde::{Deserialize, Serialize};

use super::frequency::{global_frequencies, EpisodeStats};

/// One tracked word's frequency in every episode, in episode order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSeries {
    pub word: String,
    /// Season-wide total for the word
    pub total: usize,
    /// (episode_id, frequency), exactly one point per episode
    pub points: Vec<(String, usize)>,
}

impl EvolutionSeries {
    /// The episode where the word peaked (first one on ties).
    pub fn peak(&self) -> Option<(&str, usize)> {
        self.points
            .iter()
            .fold(None, |best: Option<(&str, usize)>, (ep, n)| match best {
                Some((_, m)) if m >= *n => best,
                _ => Some((ep.as_str(), *n)),
            })
    }
}

/// Track the `tracked_words` most frequent words across the whole season.
///
/// Words are ranked by their summed frequency over all episodes, not by
/// per-episode top lists. Every series has one point per episode in the
/// order given; episodes without the word report 0.
pub fn track_evolution(episodes: &[EpisodeStats], tracked_words: usize) -> Vec<EvolutionSeries> {
    let season = global_frequencies(episodes);
    season
        .top(tracked_words)
        .into_iter()
        .map(|(word, total)| series_for(episodes, word, total))
        .collect()
}

/// Series for explicitly chosen words, whether or not they're frequent.
pub fn track_words(episodes: &[EpisodeStats], words: &[String]) -> Vec<EvolutionSeries> {
    words
        .iter()
        .map(|word| {
            let total = episodes.iter().map(|e| e.word_count.get(word)).sum();
            series_for(episodes, word.clone(), total)
        })
        .collect()
}

fn series_for(episodes: &[EpisodeStats], word: String, total: usize) -> EvolutionSeries {
    let points = episodes
        .iter()
        .map(|e| (e.episode_id.clone(), e.word_count.get(&word)))
        .collect();
    EvolutionSeries {
        word,
        total,
        points,
    }
}
