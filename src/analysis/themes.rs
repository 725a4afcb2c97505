// Theme clustering: groups the season vocabulary into seeded themes.
//
// Each theme starts from a handful of seed words. Seeds are expanded through
// a SynonymLookup, then every word of the expanded set that actually occurs
// in the season contributes its frequency to the theme. A word can count
// toward more than one theme. Themes below the share threshold are dropped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::frequency::FrequencyTable;
use super::thesaurus::SynonymLookup;

/// A theme definition: a name and its seed words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTheme {
    pub name: String,
    pub seeds: Vec<String>,
}

impl SeedTheme {
    pub fn new(name: impl Into<String>, seeds: &[&str]) -> Self {
        Self {
            name: name.into(),
            seeds: seeds.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered list of seed themes. Order breaks ties between equally
/// frequent themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCatalog {
    pub themes: Vec<SeedTheme>,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<SeedTheme>) -> Self {
        Self { themes }
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::new(vec![
            SeedTheme::new("Mystery", &["mystery", "strange", "secret", "unknown", "puzzle"]),
            SeedTheme::new("Danger", &["danger", "threat", "monster", "attack", "death"]),
            SeedTheme::new("Family", &["family", "son", "daughter", "parent", "home"]),
            SeedTheme::new("Survival", &["survive", "food", "water", "shelter", "resource"]),
            SeedTheme::new("Location", &["town", "forest", "house", "road", "building"]),
            SeedTheme::new("Emotions", &["fear", "hope", "trust", "angry", "scared"]),
            SeedTheme::new(
                "Supernatural",
                &["ghost", "spirit", "supernatural", "paranormal", "haunted"],
            ),
            SeedTheme::new(
                "Suspense",
                &["suspense", "tension", "anxiety", "anticipation", "uncertainty"],
            ),
        ])
    }
}

/// A theme that cleared the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Summed frequency of every matched word
    pub frequency: usize,
    /// frequency / total analyzed words
    pub share: f64,
    /// Most frequent matched words, count descending
    pub top_words: Vec<(String, usize)>,
    /// How many distinct season words matched
    pub matched_words: usize,
}

/// Tunables for clustering.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSettings {
    /// Minimum share of total analyzed words for a theme to be kept
    pub threshold: f64,
    /// How many example words to keep per theme
    pub top_words: usize,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            threshold: 0.01,
            top_words: 5,
        }
    }
}

/// Result of clustering: kept themes plus how many synonym lookups failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeAnalysis {
    pub themes: Vec<Theme>,
    pub synonym_failures: usize,
}

/// Cluster the season vocabulary into themes.
///
/// `total_words` is the denominator for the threshold: every analyzed word
/// in the season, not just the top-K. A failing synonym lookup degrades
/// that seed to itself; the theme is still scored.
///
/// Kept themes come back by frequency descending; equal frequencies keep
/// catalog order.
pub fn cluster_themes(
    catalog: &ThemeCatalog,
    frequencies: &FrequencyTable,
    total_words: usize,
    synonyms: &dyn SynonymLookup,
    settings: ThemeSettings,
) -> ThemeAnalysis {
    let mut analysis = ThemeAnalysis::default();
    if total_words == 0 {
        debug!("No analyzed words, skipping theme clustering");
        return analysis;
    }

    let ranked = frequencies.ranked();

    for seed_theme in &catalog.themes {
        let vocabulary = expand_theme(seed_theme, synonyms, &mut analysis.synonym_failures);

        // Walking the ranking keeps matched words in count order, ties in
        // first-seen order, with each word counted once.
        let matched: Vec<(String, usize)> = ranked
            .iter()
            .filter(|(word, _)| vocabulary.contains(word.as_str()))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }

        let frequency: usize = matched.iter().map(|(_, c)| c).sum();
        let share = frequency as f64 / total_words as f64;
        if share < settings.threshold {
            debug!(
                theme = %seed_theme.name,
                frequency,
                share,
                "Theme below threshold"
            );
            continue;
        }

        analysis.themes.push(Theme {
            name: seed_theme.name.clone(),
            frequency,
            share,
            matched_words: matched.len(),
            top_words: matched.into_iter().take(settings.top_words).collect(),
        });
    }

    analysis.themes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    analysis
}

/// Seeds plus their synonyms, lowercased, multi-word entries spaced out.
fn expand_theme(
    theme: &SeedTheme,
    synonyms: &dyn SynonymLookup,
    failures: &mut usize,
) -> HashSet<String> {
    let mut vocabulary = HashSet::new();
    for seed in &theme.seeds {
        let seed = seed.to_lowercase();
        match synonyms.synonyms(&seed) {
            Ok(list) => {
                vocabulary.extend(list.iter().map(|s| s.replace('_', " ").to_lowercase()));
            }
            Err(e) => {
                *failures += 1;
                warn!(
                    theme = %theme.name,
                    seed = %seed,
                    error = %e,
                    "Synonym lookup failed, using the seed alone"
                );
            }
        }
        vocabulary.insert(seed);
    }
    vocabulary
}
