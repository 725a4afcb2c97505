// Coarse part-of-speech tagging for single tokens.
//
// The dictionary lemmatizer only needs to know which lexicon table to look
// in, so four categories are enough. Tagging is context-free: a closed
// lexicon of known forms first, suffix heuristics second, noun otherwise.

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;

/// Coarse word class, matching the four WordNet categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Parse the single-letter WordNet code or the full name.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "n" | "noun" => Some(Self::Noun),
            "v" | "verb" => Some(Self::Verb),
            "a" | "s" | "adj" | "adjective" => Some(Self::Adjective),
            "r" | "adv" | "adverb" => Some(Self::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
        };
        f.write_str(name)
    }
}

/// Trait for assigning a part of speech to a single token.
pub trait PosTagger: Send + Sync {
    /// Tag one lowercase token. Errors mean the token can't be tagged and
    /// should be dropped.
    fn tag(&self, token: &str) -> Result<PartOfSpeech>;
}

/// Nouns ending in "-ly".
const LY_NON_ADVERBS: &[&str] = &[
    "family", "belly", "jelly", "bully", "rally", "ally", "reply", "supply", "fly", "july",
    "italy", "lily", "sally", "molly", "emily", "kelly", "assembly", "anomaly", "monopoly",
    "butterfly", "dragonfly", "firefly", "melancholy",
];

/// Words ending in "-ing" / "-ed" that are nouns or adjectives, not verbs.
const NON_VERB_ENDINGS: &[&str] = &[
    "thing", "nothing", "something", "anything", "everything", "morning", "evening", "ceiling",
    "building", "wedding", "ring", "king", "spring", "string", "wing", "sibling", "ending",
    "bed", "red", "shed", "seed", "need", "speed", "weed", "feed", "greed", "hundred", "sacred",
    "naked", "wicked", "beloved", "bleed",
];

/// Nouns that look like the comparative of a known adjective.
const ER_NOUNS: &[&str] = &["stranger"];

/// Known adjectives. Their comparative and superlative forms tag as
/// adjectives too.
pub(crate) const COMMON_ADJECTIVES: &[&str] = &[
    "dark", "cold", "strange", "scary", "safe", "big", "small", "old", "young", "long", "short",
    "fast", "slow", "hard", "easy", "quiet", "loud", "late", "close", "far", "deep", "high",
    "low", "weak", "strong", "brave", "dead", "sick", "happy", "sad", "angry", "crazy", "weird",
    "nice", "kind", "smart", "tough", "clear", "bright", "rich", "poor", "fine", "wild", "calm",
    "warm", "hot", "wet", "dry", "true", "great", "large", "black", "white", "heavy", "light",
    "near", "new", "quick", "simple", "lucky", "busy", "hungry", "lonely", "pretty", "ugly",
    "creepy", "dirty", "empty", "funny", "silly", "sorry", "tiny", "thin", "wise", "rare",
    "scared", "haunted", "tired", "worried", "afraid", "alone", "alive",
];

/// Context-free tagger: lexicon forms first, then suffix rules.
pub struct HeuristicTagger;

impl PosTagger for HeuristicTagger {
    fn tag(&self, token: &str) -> Result<PartOfSpeech> {
        if token.is_empty() {
            bail!("cannot tag an empty token");
        }
        if !token.chars().all(char::is_alphabetic) {
            bail!("cannot tag non-alphabetic token '{token}'");
        }

        if let Some(pos) = Lexicon::irregular_pos(token) {
            return Ok(pos);
        }
        if COMMON_ADJECTIVES.contains(&token) {
            return Ok(PartOfSpeech::Adjective);
        }

        if token.ends_with("ly") {
            return Ok(if LY_NON_ADVERBS.contains(&token) {
                PartOfSpeech::Noun
            } else {
                PartOfSpeech::Adverb
            });
        }

        if (token.ends_with("ing") || token.ends_with("ed")) && token.len() > 4 {
            if NON_VERB_ENDINGS.contains(&token) {
                return Ok(PartOfSpeech::Noun);
            }
            return Ok(PartOfSpeech::Verb);
        }

        if ER_NOUNS.contains(&token) {
            return Ok(PartOfSpeech::Noun);
        }
        if is_comparative(token) {
            return Ok(PartOfSpeech::Adjective);
        }

        const ADJECTIVE_SUFFIXES: &[&str] = &[
            "ous", "ful", "ive", "able", "ible", "less", "ish", "ical",
        ];
        if token.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
            return Ok(PartOfSpeech::Adjective);
        }

        Ok(PartOfSpeech::Noun)
    }
}

/// "-er"/"-est" forms of a known adjective ("darker", "biggest", "scarier").
fn is_comparative(token: &str) -> bool {
    let stem = if let Some(s) = token.strip_suffix("est") {
        s
    } else if let Some(s) = token.strip_suffix("er") {
        s
    } else {
        return false;
    };

    comparative_bases(stem)
        .iter()
        .any(|base| COMMON_ADJECTIVES.contains(&base.as_str()))
}

/// Candidate base forms for a comparative stem, most likely first.
pub(crate) fn comparative_bases(stem: &str) -> Vec<String> {
    let mut bases = vec![stem.to_string(), format!("{stem}e")];
    if let Some(s) = stem.strip_suffix('i') {
        bases.push(format!("{s}y"));
    }
    let mut rev = stem.char_indices().rev();
    if let (Some((last_at, last)), Some((_, prev))) = (rev.next(), rev.next()) {
        if last == prev {
            bases.push(stem[..last_at].to_string());
        }
    }
    bases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_rules() {
        let t = HeuristicTagger;
        assert_eq!(t.tag("quickly").unwrap(), PartOfSpeech::Adverb);
        assert_eq!(t.tag("family").unwrap(), PartOfSpeech::Noun);
        assert_eq!(t.tag("running").unwrap(), PartOfSpeech::Verb);
        assert_eq!(t.tag("morning").unwrap(), PartOfSpeech::Noun);
        assert_eq!(t.tag("dangerous").unwrap(), PartOfSpeech::Adjective);
        assert_eq!(t.tag("monster").unwrap(), PartOfSpeech::Noun);
    }

    #[test]
    fn test_comparatives() {
        let t = HeuristicTagger;
        assert_eq!(t.tag("darker").unwrap(), PartOfSpeech::Adjective);
        assert_eq!(t.tag("biggest").unwrap(), PartOfSpeech::Adjective);
        assert_eq!(t.tag("scarier").unwrap(), PartOfSpeech::Adjective);
        // "monster" ends in -er but "monst" isn't an adjective
        assert_eq!(t.tag("monster").unwrap(), PartOfSpeech::Noun);
        assert_eq!(t.tag("stranger").unwrap(), PartOfSpeech::Noun);
    }

    #[test]
    fn test_non_ascii_tokens() {
        let t = HeuristicTagger;
        assert_eq!(t.tag("a\u{30c3}\u{30c3}er").unwrap(), PartOfSpeech::Noun);
        assert_eq!(t.tag("na\u{ef}ve").unwrap(), PartOfSpeech::Adjective);
        assert_eq!(comparative_bases("b\u{30c3}\u{30c3}").last().unwrap(), "b\u{30c3}");
    }

    #[test]
    fn test_irregular_forms_come_from_lexicon() {
        let t = HeuristicTagger;
        assert_eq!(t.tag("ran").unwrap(), PartOfSpeech::Verb);
        assert_eq!(t.tag("children").unwrap(), PartOfSpeech::Noun);
    }

    #[test]
    fn test_untaggable_tokens() {
        let t = HeuristicTagger;
        assert!(t.tag("").is_err());
        assert!(t.tag("rock'n'roll").is_err());
    }

    #[test]
    fn test_pos_codes() {
        assert_eq!(PartOfSpeech::from_code("v"), Some(PartOfSpeech::Verb));
        assert_eq!(PartOfSpeech::from_code("ADJ"), Some(PartOfSpeech::Adjective));
        assert_eq!(PartOfSpeech::from_code("x"), None);
    }
}
