// Season pipeline: parse -> normalize -> count per episode, then aggregate.
//
// Episodes are independent units of work and run on a rayon parallel
// iterator. Collection preserves canonical episode order, and everything
// that spans episodes (global frequencies, evolution, themes, bigrams) is a
// sequential fold over the finished, read-only episode stats.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::outcome::StageErrors;
use super::report::{SeasonReport, SeasonSummary};
use crate::analysis::bigrams::extract_bigrams;
use crate::analysis::evolution::track_evolution;
use crate::analysis::frequency::{global_frequencies, EpisodeStats};
use crate::analysis::themes::{cluster_themes, ThemeCatalog};
use crate::analysis::thesaurus::SynonymLookup;
use crate::config::AnalysisSettings;
use crate::episodes::EpisodeFile;
use crate::subtitles::models::EpisodeTranscript;
use crate::subtitles::parser::SubtitleParser;
use crate::text::normalizer::Normalizer;

/// One episode after parsing, normalization and counting.
#[derive(Debug, Clone)]
pub struct EpisodeAnalysis {
    pub transcript: EpisodeTranscript,
    pub stats: EpisodeStats,
    pub errors: StageErrors,
    /// Encoding the file was decoded with (None if unreadable)
    pub encoding: Option<&'static str>,
}

/// Parse, normalize and count one episode file. Never fails: an unreadable
/// file comes back as empty stats with the error counted.
pub fn analyze_episode(
    file: &EpisodeFile,
    parser: &SubtitleParser,
    normalizer: &Normalizer,
    top_n: usize,
) -> EpisodeAnalysis {
    let parsed = parser.parse_file(&file.path);
    let transcript = EpisodeTranscript::new(file.id.clone(), parsed.captions);
    let normalized = normalizer.normalize(&transcript.full_text());

    let mut errors = parsed.errors;
    errors += normalized.errors;

    let stats = EpisodeStats::from_tokens(file.id.clone(), &normalized.tokens, top_n);
    debug!(
        episode = %file.id,
        captions = transcript.captions.len(),
        total_words = stats.total_words,
        unique_words = stats.unique_words,
        "Episode analyzed"
    );

    EpisodeAnalysis {
        transcript,
        stats,
        errors,
        encoding: parsed.encoding,
    }
}

/// Runs a whole season with one set of settings and resources.
pub struct SeasonAnalyzer<'a> {
    pub settings: &'a AnalysisSettings,
    pub normalizer: &'a Normalizer,
    pub synonyms: &'a dyn SynonymLookup,
    pub catalog: ThemeCatalog,
    /// Draw a progress bar while episodes are processed
    pub show_progress: bool,
}

impl<'a> SeasonAnalyzer<'a> {
    pub fn new(
        settings: &'a AnalysisSettings,
        normalizer: &'a Normalizer,
        synonyms: &'a dyn SynonymLookup,
    ) -> Self {
        Self {
            settings,
            normalizer,
            synonyms,
            catalog: ThemeCatalog::default(),
            show_progress: false,
        }
    }

    /// Analyze every file, in the order given.
    ///
    /// Fails only when there is nothing to analyze; every per-file and
    /// per-item problem is counted in the report instead.
    pub fn run(&self, files: &[EpisodeFile]) -> Result<SeasonReport> {
        if files.is_empty() {
            bail!("No episode files to analyze (expected files named episode_<id>.srt)");
        }

        info!(
            episodes = files.len(),
            lemmatizer = self.normalizer.lemmatizer_name(),
            "Analyzing season"
        );

        let pb = if self.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar().template("  Episodes [{bar:30}] {pos}/{len} ({eta})")?,
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let parser = self.settings.parser();
        let analyses: Vec<EpisodeAnalysis> = files
            .par_iter()
            .map(|file| {
                let analysis =
                    analyze_episode(file, &parser, self.normalizer, self.settings.episode_top_n);
                pb.inc(1);
                analysis
            })
            .collect();
        pb.finish_and_clear();

        let mut errors = StageErrors::default();
        let mut episodes = Vec::with_capacity(analyses.len());
        for analysis in analyses {
            errors += analysis.errors;
            episodes.push(analysis.stats);
        }

        Ok(self.aggregate(episodes, errors))
    }

    /// The cross-episode stages over already-computed episode stats.
    pub fn aggregate(&self, episodes: Vec<EpisodeStats>, mut errors: StageErrors) -> SeasonReport {
        let season = global_frequencies(&episodes);
        let total_words = season.total();

        let themes = cluster_themes(
            &self.catalog,
            &season,
            total_words,
            self.synonyms,
            self.settings.theme_settings(),
        );
        errors.synonym_failures += themes.synonym_failures;

        let evolution = track_evolution(&episodes, self.settings.tracked_words);
        let bigrams = extract_bigrams(&episodes);

        if !errors.is_clean() {
            warn!(
                malformed_blocks = errors.malformed_blocks,
                malformed_timestamps = errors.malformed_timestamps,
                unreadable_files = errors.unreadable_files,
                dropped_tokens = errors.dropped_tokens,
                synonym_failures = errors.synonym_failures,
                "Season analyzed with skipped items"
            );
        }
        info!(
            episodes = episodes.len(),
            total_words,
            unique_words = season.len(),
            themes = themes.themes.len(),
            "Season analysis complete"
        );

        SeasonReport {
            summary: SeasonSummary::from_episodes(&episodes, season.len()),
            global_top: season.top(self.settings.global_top_k),
            evolution,
            themes: themes.themes,
            bigrams,
            episodes,
            errors,
            lemmatizer: self.normalizer.lemmatizer_name().to_string(),
        }
    }
}
