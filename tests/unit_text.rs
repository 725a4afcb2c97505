// Unit tests for text normalization.
//
// Tests the public normalization surface: tokenizing, stopword loading and
// fallback, both lemmatization strategies, lexicon extension, cache
// transparency, and token rejection accounting.

use std::io::Write;

use sublex::pipeline::outcome::Outcome;
use sublex::text::lemmatize::{DictionaryLemmatizer, Lemmatizer, RuleLemmatizer};
use sublex::text::lexicon::Lexicon;
use sublex::text::normalizer::Normalizer;
use sublex::text::stopwords::StopwordSet;
use sublex::text::tagger::{HeuristicTagger, PartOfSpeech, PosTagger};
use sublex::text::tokenize::tokenize;

/// Tagger that fails on every token, standing in for a broken POS model.
struct BrokenTagger;

impl PosTagger for BrokenTagger {
    fn tag(&self, token: &str) -> anyhow::Result<PartOfSpeech> {
        anyhow::bail!("tagger crashed on '{token}'")
    }
}

fn lemma(lem: &dyn Lemmatizer, token: &str) -> Option<String> {
    match lem.lemmatize(token, None) {
        Outcome::Kept(l) => Some(l),
        Outcome::Skipped(_) => None,
    }
}

// ============================================================
// Tokenizer
// ============================================================

#[test]
fn tokenizer_enforces_minimum_alphabetic_length() {
    assert_eq!(tokenize("I am the one, ok?", 3), vec!["the", "one"]);
}

#[test]
fn tokenizer_lowercases_and_keeps_contractions() {
    assert_eq!(tokenize("WE'RE Not Alone", 3), vec!["we're", "not", "alone"]);
}

#[test]
fn tokenizer_keeps_accented_words_whole() {
    assert_eq!(
        tokenize("Her résumé from the café was naïve", 3),
        vec!["her", "résumé", "from", "the", "café", "was", "naïve"]
    );
}

// ============================================================
// Stopwords
// ============================================================

#[test]
fn embedded_stopwords_cover_general_and_dialogue_words() {
    let set = StopwordSet::embedded();
    for word in ["the", "and", "dont", "gonna", "yeah"] {
        assert!(set.contains(word), "{word} should be a stopword");
    }
}

#[test]
fn user_stopword_file_extends_embedded_set() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# show-specific names\nderek\n\nsara").unwrap();
    file.flush().unwrap();

    let set = StopwordSet::load(Some(file.path()));
    assert!(set.contains("derek"));
    assert!(set.contains("sara"));
    assert!(set.contains("the"));
    assert!(!set.contains("# show-specific names"));
}

#[test]
fn missing_stopword_file_falls_back_to_embedded() {
    let set = StopwordSet::load(Some(std::path::Path::new("/no/such/stopwords.txt")));
    assert_eq!(set.len(), StopwordSet::embedded().len());
}

// ============================================================
// Lemmatizers
// ============================================================

#[test]
fn rule_and_dictionary_disagree_only_on_irregulars() {
    let dict = DictionaryLemmatizer::new(Lexicon::embedded(), 64);
    for word in ["running", "monsters", "stories"] {
        assert_eq!(lemma(&RuleLemmatizer, word), lemma(&dict, word), "{word}");
    }
    assert_eq!(lemma(&RuleLemmatizer, "ran").as_deref(), Some("ran"));
    assert_eq!(lemma(&dict, "ran").as_deref(), Some("run"));
}

#[test]
fn short_doubled_stems_are_not_undoubled() {
    let dict = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
    for word in ["added", "adding"] {
        assert_eq!(lemma(&RuleLemmatizer, word).as_deref(), Some("add"), "{word}");
        assert_eq!(lemma(&dict, word).as_deref(), Some("add"), "{word}");
    }
}

#[test]
fn non_ascii_tokens_never_panic() {
    let dict = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
    for word in ["aッed", "abッッing", "ッッer", "naïve", "résumés"] {
        assert!(lemma(&RuleLemmatizer, word).is_some(), "{word}");
        assert!(lemma(&dict, word).is_some(), "{word}");
        assert!(HeuristicTagger.tag(word).is_ok(), "{word}");
    }
}

#[test]
fn stranger_stays_a_noun() {
    let dict = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
    assert_eq!(HeuristicTagger.tag("stranger").unwrap(), PartOfSpeech::Noun);
    assert_eq!(lemma(&dict, "stranger").as_deref(), Some("stranger"));
    assert_eq!(lemma(&dict, "strangers").as_deref(), Some("stranger"));
    assert_eq!(lemma(&dict, "darker").as_deref(), Some("dark"));
}

#[test]
fn lexicon_file_adds_forms() {
    let mut lexicon = Lexicon::embedded();
    let added = lexicon.extend_from_tsv("cacti\tn\tcactus\n");
    assert_eq!(added, 1);

    let without = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
    let with = DictionaryLemmatizer::new(lexicon, 0);
    assert_eq!(lemma(&without, "cacti").as_deref(), Some("cacti"));
    assert_eq!(lemma(&with, "cacti").as_deref(), Some("cactus"));
}

#[test]
fn missing_lexicon_file_falls_back_to_embedded() {
    let lexicon = Lexicon::load(Some(std::path::Path::new("/no/such/lexicon.tsv")));
    assert_eq!(lexicon.len(), Lexicon::embedded().len());
}

#[test]
fn cache_is_transparent() {
    let cached = DictionaryLemmatizer::new(Lexicon::embedded(), 8);
    let uncached = DictionaryLemmatizer::new(Lexicon::embedded(), 0);
    let words = [
        "running", "ran", "children", "darker", "houses", "running", "lived", "ran",
        "monsters", "families", "scared", "quickly", "running",
    ];

    for word in words {
        assert_eq!(lemma(&cached, word), lemma(&uncached, word), "{word}");
    }
    // Repeats of "running" and "ran" hit; capacity 8 evicts the oldest two
    let (hits, misses) = cached.cache_stats();
    assert_eq!(hits, 3);
    assert_eq!(hits + misses, words.len());
    assert!(cached.cache_len() <= 8);
    assert_eq!(uncached.cache_len(), 0);
}

#[test]
fn tiny_cache_evicts_but_stays_correct() {
    let cached = DictionaryLemmatizer::new(Lexicon::embedded(), 1);
    assert_eq!(lemma(&cached, "ran").as_deref(), Some("run"));
    assert_eq!(lemma(&cached, "children").as_deref(), Some("child"));
    assert_eq!(lemma(&cached, "ran").as_deref(), Some("run"));
    assert_eq!(cached.cache_len(), 1);
}

#[test]
fn heuristic_tagger_classes() {
    let tagger = HeuristicTagger;
    assert_eq!(tagger.tag("went").unwrap(), PartOfSpeech::Verb);
    assert_eq!(tagger.tag("quickly").unwrap(), PartOfSpeech::Adverb);
    assert_eq!(tagger.tag("family").unwrap(), PartOfSpeech::Noun);
    assert_eq!(tagger.tag("dangerous").unwrap(), PartOfSpeech::Adjective);
    assert!(tagger.tag("don't").is_err());
}

// ============================================================
// Normalizer
// ============================================================

#[test]
fn stopwords_are_removed_before_lemmatizing() {
    let normalizer = Normalizer::new(StopwordSet::embedded(), Box::new(RuleLemmatizer), 3);
    let out = normalizer.normalize("Yeah, I'm gonna find the monsters in the forest.");
    assert!(out.tokens.contains(&"monster".to_string()));
    assert!(out.tokens.contains(&"forest".to_string()));
    for dropped in ["yeah", "gonna", "the"] {
        assert!(!out.tokens.contains(&dropped.to_string()), "{dropped}");
    }
}

#[test]
fn tagger_failures_drop_tokens_without_aborting() {
    let lemmatizer = DictionaryLemmatizer::with_tagger(Box::new(BrokenTagger), Lexicon::embedded(), 16);
    let normalizer = Normalizer::new(StopwordSet::empty(), Box::new(lemmatizer), 3);

    let out = normalizer.normalize("ghost forest monster");
    assert!(out.tokens.is_empty());
    assert_eq!(out.errors.dropped_tokens, 3);
}

#[test]
fn lemmas_below_minimum_length_are_dropped_and_counted() {
    let normalizer = Normalizer::new(StopwordSet::empty(), Box::new(RuleLemmatizer), 3);
    let out = normalizer.normalize("They added more water, we'll see.");
    assert_eq!(out.tokens, vec!["they", "add", "more", "water", "see"]);
    assert_eq!(out.errors.dropped_tokens, 1);
}

#[test]
fn normalizing_is_deterministic() {
    let normalizer = Normalizer::new(
        StopwordSet::embedded(),
        Box::new(DictionaryLemmatizer::new(Lexicon::embedded(), 32)),
        3,
    );
    let text = "The children ran through the darker woods, running from the monsters.";
    assert_eq!(normalizer.normalize(text).tokens, normalizer.normalize(text).tokens);
}
