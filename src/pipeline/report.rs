// The season report: everything a renderer needs, in one value.

use serde::{Deserialize, Serialize};

use super::outcome::StageErrors;
use crate::analysis::bigrams::Bigram;
use crate::analysis::evolution::EvolutionSeries;
use crate::analysis::frequency::EpisodeStats;
use crate::analysis::themes::Theme;

/// Headline numbers for the whole season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub episode_count: usize,
    /// Every analyzed word across the season, duplicates included
    pub total_words: usize,
    /// Distinct lemmas across the season
    pub unique_words: usize,
    /// Mean of the per-episode lexical densities
    pub mean_lexical_density: f64,
    /// (episode_id, density) of the densest episode, first one on ties
    pub densest_episode: Option<(String, f64)>,
}

impl SeasonSummary {
    pub fn from_episodes(episodes: &[EpisodeStats], unique_words: usize) -> Self {
        let total_words = episodes.iter().map(|e| e.total_words).sum();
        let mean_lexical_density = if episodes.is_empty() {
            0.0
        } else {
            episodes.iter().map(|e| e.lexical_density).sum::<f64>() / episodes.len() as f64
        };
        let densest_episode = episodes
            .iter()
            .fold(None, |best: Option<&EpisodeStats>, e| match best {
                Some(b) if b.lexical_density >= e.lexical_density => best,
                _ => Some(e),
            })
            .map(|e| (e.episode_id.clone(), e.lexical_density));

        Self {
            episode_count: episodes.len(),
            total_words,
            unique_words,
            mean_lexical_density,
            densest_episode,
        }
    }
}

/// Result of analyzing one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub summary: SeasonSummary,
    /// One entry per episode, in canonical episode order
    pub episodes: Vec<EpisodeStats>,
    /// Season-wide top-K lemmas
    pub global_top: Vec<(String, usize)>,
    /// Tracked words, most frequent first
    pub evolution: Vec<EvolutionSeries>,
    pub themes: Vec<Theme>,
    pub bigrams: Vec<Bigram>,
    /// Everything skipped along the way
    pub errors: StageErrors,
    pub lemmatizer: String,
}

impl SeasonReport {
    /// Evolution series for one word, if it was tracked.
    pub fn series(&self, word: &str) -> Option<&EvolutionSeries> {
        self.evolution.iter().find(|s| s.word == word)
    }

    pub fn episode(&self, episode_id: &str) -> Option<&EpisodeStats> {
        self.episodes.iter().find(|e| e.episode_id == episode_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(id: &str, tokens: &[&str]) -> EpisodeStats {
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        EpisodeStats::from_tokens(id, &tokens, 15)
    }

    #[test]
    fn test_summary() {
        let episodes = vec![
            stats("01", &["fear", "fear"]),
            stats("02", &["dark", "town"]),
        ];
        let summary = SeasonSummary::from_episodes(&episodes, 3);
        assert_eq!(summary.episode_count, 2);
        assert_eq!(summary.total_words, 4);
        assert!((summary.mean_lexical_density - 0.75).abs() < 1e-9);
        assert_eq!(summary.densest_episode, Some(("02".to_string(), 1.0)));
    }

    #[test]
    fn test_empty_summary() {
        let summary = SeasonSummary::from_episodes(&[], 0);
        assert_eq!(summary.mean_lexical_density, 0.0);
        assert!(summary.densest_episode.is_none());
    }
}
