use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use crate::analysis::themes::ThemeSettings;
use crate::analysis::thesaurus::Thesaurus;
use crate::subtitles::encoding::encoding_for_label;
use crate::subtitles::parser::SubtitleParser;
use crate::text::lemmatize::{DictionaryLemmatizer, Lemmatizer, RuleLemmatizer};
use crate::text::lexicon::Lexicon;
use crate::text::normalizer::Normalizer;
use crate::text::stopwords::StopwordSet;

/// Which lemmatization strategy the normalizer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LemmatizerKind {
    /// Lexicon lookup with part-of-speech tagging (default)
    Dictionary,
    /// Suffix stripping only, no lexicon
    Rules,
}

/// Central configuration loaded from environment variables.
///
/// Everything here points at optional resources. A missing file is never
/// an error: the embedded defaults take over and a warning is logged when
/// the resource is actually loaded.
pub struct Config {
    /// Directory of `episode_<id>.srt` files (SUBLEX_DATA_DIR, default ./data)
    pub data_dir: PathBuf,
    /// User stopword list, one word per line
    pub stopwords_path: Option<PathBuf>,
    /// Lexicon TSV (`form<TAB>pos<TAB>lemma`) for the dictionary lemmatizer
    pub lexicon_path: Option<PathBuf>,
    /// Synonym JSON (`{"word": ["synonym", ...]}`)
    pub thesaurus_path: Option<PathBuf>,
    pub lemmatizer: LemmatizerKind,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let lemmatizer = match env::var("SUBLEX_LEMMATIZER").as_deref() {
            Ok("rules") => LemmatizerKind::Rules,
            Ok("dictionary") | Err(_) => LemmatizerKind::Dictionary,
            Ok(other) => {
                warn!(value = other, "Unknown SUBLEX_LEMMATIZER, using dictionary");
                LemmatizerKind::Dictionary
            }
        };

        // An explicitly configured list is always attempted (and warned about
        // if missing); the default location is only used when it exists.
        let stopwords_path = env::var("SUBLEX_STOPWORDS")
            .map(PathBuf::from)
            .ok()
            .or_else(|| default_stopwords_path().filter(|p| p.exists()));

        Ok(Self {
            data_dir: env::var("SUBLEX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            stopwords_path,
            lexicon_path: env::var("SUBLEX_LEXICON").map(PathBuf::from).ok(),
            thesaurus_path: env::var("SUBLEX_THESAURUS").map(PathBuf::from).ok(),
            lemmatizer,
        })
    }

    /// Stopwords and lemmatizer assembled into a normalizer.
    pub fn build_normalizer(&self, settings: &AnalysisSettings) -> Normalizer {
        let stopwords = StopwordSet::load(self.stopwords_path.as_deref());
        let lemmatizer: Box<dyn Lemmatizer> = match self.lemmatizer {
            LemmatizerKind::Dictionary => Box::new(DictionaryLemmatizer::new(
                Lexicon::load(self.lexicon_path.as_deref()),
                settings.lemma_cache_capacity,
            )),
            LemmatizerKind::Rules => Box::new(RuleLemmatizer),
        };
        Normalizer::new(stopwords, lemmatizer, settings.min_token_len)
    }

    pub fn load_thesaurus(&self) -> Thesaurus {
        Thesaurus::load(self.thesaurus_path.as_deref())
    }
}

/// `<config dir>/sublex/stopwords.txt`, if the platform has a config dir.
pub fn default_stopwords_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sublex").join("stopwords.txt"))
}

/// Tunables for one analysis run. CLI flags override the defaults.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Size of each episode's top-word list
    pub episode_top_n: usize,
    /// Size of the season-wide top list
    pub global_top_k: usize,
    /// How many season-frequent words get an evolution series
    pub tracked_words: usize,
    pub theme_threshold: f64,
    pub theme_top_words: usize,
    pub min_token_len: usize,
    /// Seconds; shorter captions are dropped
    pub min_caption_duration: f64,
    /// 0 disables the lemma cache
    pub lemma_cache_capacity: usize,
    /// Encoding label for files detection can't decide on
    pub default_encoding: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            episode_top_n: 15,
            global_top_k: 100,
            tracked_words: 50,
            theme_threshold: 0.01,
            theme_top_words: 5,
            min_token_len: 3,
            min_caption_duration: 0.001,
            lemma_cache_capacity: 4096,
            default_encoding: "utf-8".to_string(),
        }
    }
}

impl AnalysisSettings {
    pub fn parser(&self) -> SubtitleParser {
        SubtitleParser {
            min_duration: self.min_caption_duration,
            default_encoding: encoding_for_label(&self.default_encoding),
        }
    }

    pub fn theme_settings(&self) -> ThemeSettings {
        ThemeSettings {
            threshold: self.theme_threshold,
            top_words: self.theme_top_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.episode_top_n, 15);
        assert_eq!(settings.global_top_k, 100);
        assert_eq!(settings.tracked_words, 50);
        assert_eq!(settings.theme_settings().top_words, 5);
    }

    #[test]
    fn test_parser_uses_configured_encoding() {
        let settings = AnalysisSettings {
            default_encoding: "latin1".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.parser().default_encoding.name(), "windows-1252");
    }

    #[test]
    fn test_rules_normalizer() {
        let config = Config {
            data_dir: PathBuf::from("."),
            stopwords_path: None,
            lexicon_path: None,
            thesaurus_path: None,
            lemmatizer: LemmatizerKind::Rules,
        };
        let normalizer = config.build_normalizer(&AnalysisSettings::default());
        assert_eq!(normalizer.lemmatizer_name(), "rules");
    }
}
