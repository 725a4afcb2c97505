// Lemmatizers: reduce a token to its dictionary form.
//
// Two strategies sit behind one trait:
//
// - RuleLemmatizer: suffix stripping only. No dictionary, so irregular forms
//   ("ran") pass through unchanged.
// - DictionaryLemmatizer: tags the token, looks (token, pos) up in a lexicon,
//   and falls back to morphology constrained by the part of speech. Results
//   are memoized in a bounded LRU cache.
//
// The two can disagree on irregular forms. Both are deterministic.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lru::LruCache;
use tracing::debug;

use super::lexicon::Lexicon;
use super::tagger::{
    comparative_bases, HeuristicTagger, PartOfSpeech, PosTagger, COMMON_ADJECTIVES,
};
use super::tokenize::is_alphabetic_word;
use crate::pipeline::outcome::{Outcome, SkipReason};

/// Stems must be longer than this for "-ed"/"-ing" to be stripped.
const MIN_STEM_LEN: usize = 2;

/// Contraction suffixes. Stripping one leaves the head word.
const CONTRACTIONS: &[&str] = &["n't", "'re", "'m", "'ll", "'d", "'ve"];

/// Words whose "-ing"/"-s" ending is part of the word.
const INVARIANT: &[&str] = &[
    "nothing", "something", "anything", "everything", "morning", "evening", "ceiling",
    "during", "bring", "thing", "string", "spring", "king", "ring", "wedding", "sibling",
    "always", "perhaps", "news", "series", "species", "physics", "chaos", "kansas", "texas",
];

/// Trait for turning a token into its lemma.
pub trait Lemmatizer: Send + Sync {
    /// Lemmatize one lowercase token. `pos` is a hint; strategies that tag
    /// tokens themselves may ignore it when absent. A Skipped outcome means
    /// the token should be dropped.
    fn lemmatize(&self, token: &str, pos: Option<PartOfSpeech>) -> Outcome<String>;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Suffix-stripping lemmatizer with no external dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLemmatizer;

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, token: &str, _pos: Option<PartOfSpeech>) -> Outcome<String> {
        let base = strip_clitics(token);
        let lemma = if base.len() < token.len() {
            // Contraction or possessive: the head word is the lemma
            base.to_string()
        } else {
            strip_inflection(base)
        };
        accept(token, lemma)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Lexicon + POS-aware lemmatizer with a bounded memo cache.
pub struct DictionaryLemmatizer {
    tagger: Box<dyn PosTagger>,
    lexicon: Lexicon,
    /// None when caching is disabled (capacity 0)
    cache: Option<Mutex<LruCache<(String, PartOfSpeech), Option<String>>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl DictionaryLemmatizer {
    /// Build with the heuristic tagger. `cache_capacity` 0 disables caching.
    pub fn new(lexicon: Lexicon, cache_capacity: usize) -> Self {
        Self::with_tagger(Box::new(HeuristicTagger), lexicon, cache_capacity)
    }

    pub fn with_tagger(tagger: Box<dyn PosTagger>, lexicon: Lexicon, cache_capacity: usize) -> Self {
        let cache = NonZeroUsize::new(cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self {
            tagger,
            lexicon,
            cache,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// (hits, misses) since construction.
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    /// Number of entries currently cached.
    pub fn cache_len(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.lock().ok().map(|c| c.len()))
            .unwrap_or(0)
    }

    /// Uncached resolution of a tagged word.
    fn resolve(&self, word: &str, pos: PartOfSpeech) -> Option<String> {
        if let Some(lemma) = self.lexicon.lookup(word, pos) {
            return Some(lemma.to_string());
        }
        if INVARIANT.contains(&word) {
            return Some(word.to_string());
        }

        let lemma = match pos {
            PartOfSpeech::Noun => strip_plural(word),
            PartOfSpeech::Verb => strip_verb_inflection(word),
            PartOfSpeech::Adjective => strip_comparative(word),
            PartOfSpeech::Adverb => word.to_string(),
        };
        // Apostrophes survive tokenizing but never belong in a lemma
        if is_alphabetic_word(&lemma) && !lemma.contains('\'') {
            Some(lemma)
        } else {
            None
        }
    }

    fn cached_resolve(&self, word: &str, pos: PartOfSpeech) -> Option<String> {
        let Some(cache) = &self.cache else {
            return self.resolve(word, pos);
        };

        let key = (word.to_string(), pos);
        if let Ok(mut guard) = cache.lock() {
            if let Some(hit) = guard.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return hit.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let resolved = self.resolve(word, pos);
        if let Ok(mut guard) = cache.lock() {
            guard.put(key, resolved.clone());
        }
        resolved
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, token: &str, pos: Option<PartOfSpeech>) -> Outcome<String> {
        let word = strip_clitics(token);

        let pos = match pos {
            Some(pos) => pos,
            None => match self.tagger.tag(word) {
                Ok(pos) => pos,
                Err(e) => {
                    debug!(token, error = %e, "Tagger rejected token");
                    return Outcome::Skipped(SkipReason::RejectedToken(token.to_string()));
                }
            },
        };

        match self.cached_resolve(word, pos) {
            Some(lemma) => accept(token, lemma),
            None => Outcome::Skipped(SkipReason::RejectedToken(token.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

/// Final gate shared by both strategies: the lemma must be a plain word.
fn accept(token: &str, lemma: String) -> Outcome<String> {
    if !lemma.is_empty() && lemma.chars().all(char::is_alphabetic) {
        Outcome::Kept(lemma)
    } else {
        Outcome::Skipped(SkipReason::RejectedToken(token.to_string()))
    }
}

/// Remove a possessive or contraction suffix, returning the head word.
fn strip_clitics(token: &str) -> &str {
    match token {
        "won't" => return "will",
        "can't" => return "can",
        "shan't" => return "shall",
        _ => {}
    }
    if let Some(head) = token.strip_suffix("'s") {
        return head;
    }
    if token.ends_with("s'") {
        return &token[..token.len() - 1];
    }
    for suffix in CONTRACTIONS {
        if let Some(head) = token.strip_suffix(suffix) {
            return head;
        }
    }
    token
}

/// Rule-based inflection stripping, in order: plurals, past tense,
/// progressive, then a bare trailing "s".
fn strip_inflection(word: &str) -> String {
    if INVARIANT.contains(&word) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if is_sibilant(stem) {
            return stem.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        if word.len() > 4 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        return if stem.len() > MIN_STEM_LEN {
            undouble(stem).to_string()
        } else {
            word.to_string()
        };
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return if stem.len() > MIN_STEM_LEN {
            undouble(stem).to_string()
        } else {
            word.to_string()
        };
    }
    strip_trailing_s(word)
}

fn strip_plural(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if is_sibilant(stem) {
            return stem.to_string();
        }
    }
    strip_trailing_s(word)
}

fn strip_verb_inflection(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        if word.len() > 4 {
            return format!("{stem}y");
        }
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() <= MIN_STEM_LEN {
                return word.to_string();
            }
            let undoubled = undouble(stem);
            if undoubled.len() < stem.len() {
                return undoubled.to_string();
            }
            return restore_silent_e(stem);
        }
    }
    // Third person singular
    strip_plural(word)
}

fn strip_comparative(word: &str) -> String {
    let stem = word
        .strip_suffix("est")
        .or_else(|| word.strip_suffix("er"));
    let Some(stem) = stem else {
        return word.to_string();
    };
    comparative_bases(stem)
        .into_iter()
        .find(|base| COMMON_ADJECTIVES.contains(&base.as_str()))
        .unwrap_or_else(|| word.to_string())
}

fn strip_trailing_s(word: &str) -> String {
    let keeps_s = word.ends_with("ss") || word.ends_with("us") || word.ends_with("is");
    match word.strip_suffix('s') {
        Some(stem) if !keeps_s && word.len() > 3 => stem.to_string(),
        _ => word.to_string(),
    }
}

fn is_sibilant(stem: &str) -> bool {
    ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|end| stem.ends_with(end))
        && stem.len() > 1
}

/// "runn" -> "run", "stopp" -> "stop". Doubled l, s, z and vowels are kept
/// ("kill"), and the result never drops to MIN_STEM_LEN letters ("add").
fn undouble(stem: &str) -> &str {
    if stem.chars().count() <= MIN_STEM_LEN + 1 {
        return stem;
    }
    let mut rev = stem.char_indices().rev();
    let (Some((last_at, last)), Some((_, prev))) = (rev.next(), rev.next()) else {
        return stem;
    };
    if last == prev && last.is_ascii_lowercase() && !"lszaeiou".contains(last) {
        &stem[..last_at]
    } else {
        stem
    }
}

/// "liv" -> "live", "danc" -> "dance". Only for endings that can't close an
/// English word without a trailing e.
fn restore_silent_e(stem: &str) -> String {
    let needs_e = stem.ends_with('v')
        || (stem.ends_with('z') && !stem.ends_with("zz"))
        || (stem.ends_with('c') && !stem.ends_with("ck") && !stem.ends_with("ic"))
        || stem.ends_with('u');
    if needs_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(token: &str) -> Option<String> {
        match RuleLemmatizer.lemmatize(token, None) {
            Outcome::Kept(l) => Some(l),
            Outcome::Skipped(_) => None,
        }
    }

    fn dict(lem: &DictionaryLemmatizer, token: &str) -> Option<String> {
        match lem.lemmatize(token, None) {
            Outcome::Kept(l) => Some(l),
            Outcome::Skipped(_) => None,
        }
    }

    #[test]
    fn test_rule_plurals() {
        assert_eq!(rule("stories").as_deref(), Some("story"));
        assert_eq!(rule("boxes").as_deref(), Some("box"));
        assert_eq!(rule("watches").as_deref(), Some("watch"));
        assert_eq!(rule("monsters").as_deref(), Some("monster"));
        assert_eq!(rule("boss").as_deref(), Some("boss"));
    }

    #[test]
    fn test_rule_verbs() {
        assert_eq!(rule("running").as_deref(), Some("run"));
        assert_eq!(rule("runs").as_deref(), Some("run"));
        assert_eq!(rule("killed").as_deref(), Some("kill"));
        assert_eq!(rule("stopped").as_deref(), Some("stop"));
        assert_eq!(rule("tried").as_deref(), Some("try"));
        // Irregular forms are a documented limitation of the rule strategy
        assert_eq!(rule("ran").as_deref(), Some("ran"));
    }

    #[test]
    fn test_short_doubled_stems_are_kept() {
        assert_eq!(rule("added").as_deref(), Some("add"));
        assert_eq!(rule("adding").as_deref(), Some("add"));
        let lem = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
        assert_eq!(dict(&lem, "added").as_deref(), Some("add"));
    }

    #[test]
    fn test_non_ascii_stems_do_not_panic() {
        let lem = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
        for token in ["a\u{30c3}ed", "ab\u{30c3}\u{30c3}ed", "caf\u{e9}s"] {
            assert!(RuleLemmatizer.lemmatize(token, None).is_kept(), "{token}");
            assert!(lem.lemmatize(token, None).is_kept(), "{token}");
        }
        assert_eq!(rule("ab\u{30c3}\u{30c3}ed").as_deref(), Some("ab\u{30c3}\u{30c3}"));
    }

    #[test]
    fn test_rule_stem_threshold() {
        // "need" -> stem "ne" is too short to strip
        assert_eq!(rule("need").as_deref(), Some("need"));
        assert_eq!(rule("sing").as_deref(), Some("sing"));
    }

    #[test]
    fn test_rule_contractions_and_possessives() {
        assert_eq!(rule("sheriff's").as_deref(), Some("sheriff"));
        assert_eq!(rule("they'll").as_deref(), Some("they"));
        assert_eq!(rule("won't").as_deref(), Some("will"));
    }

    #[test]
    fn test_rule_rejects_non_words() {
        assert_eq!(rule("rock'n'roll"), None);
    }

    #[test]
    fn test_dictionary_irregulars() {
        let lem = DictionaryLemmatizer::new(Lexicon::embedded(), 16);
        assert_eq!(dict(&lem, "ran").as_deref(), Some("run"));
        assert_eq!(dict(&lem, "children").as_deref(), Some("child"));
        assert_eq!(dict(&lem, "better").as_deref(), Some("good"));
        assert_eq!(dict(&lem, "running").as_deref(), Some("run"));
        assert_eq!(dict(&lem, "lived").as_deref(), Some("live"));
        assert_eq!(dict(&lem, "darker").as_deref(), Some("dark"));
        assert_eq!(dict(&lem, "monsters").as_deref(), Some("monster"));
    }

    #[test]
    fn test_dictionary_explicit_pos() {
        let lem = DictionaryLemmatizer::new(Lexicon::embedded(), 16);
        let outcome = lem.lemmatize("better", Some(PartOfSpeech::Adverb));
        assert_eq!(outcome, Outcome::Kept("well".to_string()));
    }

    #[test]
    fn test_dictionary_tagger_failure_is_skip() {
        let lem = DictionaryLemmatizer::new(Lexicon::embedded(), 16);
        assert!(!lem.lemmatize("rock'n'roll", None).is_kept());
    }

    #[test]
    fn test_cache_is_transparent() {
        let cached = DictionaryLemmatizer::new(Lexicon::embedded(), 4);
        let uncached = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
        let words = [
            "running", "ran", "monsters", "running", "houses", "darker", "ran", "families",
            "quickly", "running", "attacked", "ghosts",
        ];
        for w in words {
            assert_eq!(cached.lemmatize(w, None), uncached.lemmatize(w, None), "{w}");
        }
        let (hits, misses) = cached.cache_stats();
        assert!(hits > 0);
        assert_eq!(hits + misses, words.len());
        assert!(cached.cache_len() <= 4);
        assert_eq!(uncached.cache_stats(), (0, 0));
    }
}
