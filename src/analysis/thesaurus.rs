// Synonym lookup: the lexical relation database behind theme expansion.
//
// Like the lemmatizer, this sits behind a trait so theme clustering can be
// tested with a fixed table and run without any external database. The
// embedded thesaurus covers the seed vocabulary of the default theme
// catalog; a JSON file (`{"word": ["synonym", ...]}`) can extend it.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Trait for looking up a word's synonyms.
pub trait SynonymLookup: Send + Sync {
    /// Synonyms of `word`. An unknown word is `Ok(vec![])`; `Err` means the
    /// lookup itself failed.
    fn synonyms(&self, word: &str) -> Result<Vec<String>>;
}

/// No expansion at all: themes match on their seed words only.
pub struct SeedOnly;

impl SynonymLookup for SeedOnly {
    fn synonyms(&self, _word: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Synonym sets for the default seed vocabulary, in WordNet's spirit.
const EMBEDDED: &[(&str, &[&str])] = &[
    ("mystery", &["enigma", "secret", "riddle", "puzzle", "closed_book"]),
    ("strange", &["unusual", "odd", "peculiar", "weird", "curious", "foreign", "unknown"]),
    ("secret", &["mystery", "enigma", "hidden", "clandestine", "cryptic", "arcane", "private"]),
    ("unknown", &["strange", "unidentified", "obscure", "nameless", "unnamed", "stranger"]),
    ("puzzle", &["mystery", "enigma", "riddle", "baffle", "perplex", "mystify", "confuse"]),
    ("danger", &["peril", "risk", "hazard", "threat", "jeopardy"]),
    ("threat", &["menace", "danger", "terror", "scourge", "threaten"]),
    ("monster", &["demon", "devil", "fiend", "giant", "freak", "creature", "ogre", "beast"]),
    ("attack", &["assault", "onslaught", "onset", "blast", "strike", "raid"]),
    ("death", &["decease", "demise", "dying", "end", "destruction", "expiry", "loss"]),
    ("family", &["household", "house", "home", "kin", "kinfolk", "folk", "clan"]),
    ("son", &["boy", "child", "male_child"]),
    ("daughter", &["girl", "child"]),
    ("parent", &["mother", "father", "raise", "rear", "bring_up"]),
    ("home", &["house", "family", "dwelling", "abode", "domicile", "base", "place"]),
    ("survive", &["last", "live", "endure", "outlive", "outlast", "hold_up"]),
    ("food", &["nutrient", "fare", "meal", "nourishment", "solid_food"]),
    ("water", &["body_of_water", "irrigate", "H2O"]),
    ("shelter", &["protection", "refuge", "shield", "housing", "hut"]),
    ("resource", &["resourcefulness", "imagination", "supply"]),
    ("town", &["township", "city", "village"]),
    ("forest", &["wood", "woods", "woodland", "timberland"]),
    ("house", &["home", "household", "family", "dwelling", "mansion"]),
    ("road", &["route", "path", "way", "highway"]),
    ("building", &["edifice", "construction", "structure"]),
    ("fear", &["fright", "dread", "terror", "panic", "horror", "worry", "afraid", "frighten"]),
    ("hope", &["promise", "trust", "desire", "wish"]),
    ("trust", &["faith", "belief", "confidence", "hope", "rely", "believe", "depend"]),
    ("angry", &["furious", "raging", "mad", "upset", "wild"]),
    ("scared", &["afraid", "frightened", "fearful", "terrified"]),
    ("ghost", &["spook", "shade", "specter", "spectre", "wraith", "spirit", "phantom", "haunt"]),
    ("spirit", &["soul", "ghost", "spook", "wraith", "specter", "heart"]),
    ("supernatural", &["occult", "mysterious", "magical", "uncanny", "eldritch"]),
    ("paranormal", &["supernatural", "psychic"]),
    ("haunted", &["obsessed", "preoccupied", "ghostly", "spooky", "haunt", "tormented"]),
    ("suspense", &["tension", "anxiety", "uncertainty", "doubt"]),
    ("tension", &["stress", "strain", "tenseness", "tautness", "anxiety"]),
    ("anxiety", &["anxiousness", "worry", "fear", "dread", "nervousness", "unease"]),
    ("anticipation", &["expectancy", "expectation", "prevision"]),
    ("uncertainty", &["doubt", "dubiety", "incertitude", "suspense"]),
];

/// In-memory synonym table.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    entries: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    /// The built-in table for the default theme catalog.
    pub fn embedded() -> Self {
        let entries = EMBEDDED
            .iter()
            .map(|(word, syns)| {
                (
                    word.to_string(),
                    syns.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Parse a JSON object of word -> synonym list.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, Vec<String>> =
            serde_json::from_str(json).context("Thesaurus JSON must map words to lists")?;
        Ok(Self { entries })
    }

    /// The embedded table, extended with a JSON file if given and readable.
    pub fn load(path: Option<&Path>) -> Self {
        let mut thesaurus = Self::embedded();
        let Some(path) = path else {
            return thesaurus;
        };

        let loaded = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read thesaurus {}", path.display()))
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(extra) => {
                debug!(path = %path.display(), words = extra.len(), "Loaded thesaurus file");
                thesaurus.extend(extra);
            }
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Thesaurus unavailable, using the embedded table"
            ),
        }
        thesaurus
    }

    /// Merge another table in; synonym lists for the same word are unioned.
    pub fn extend(&mut self, other: Thesaurus) {
        for (word, syns) in other.entries {
            let list = self.entries.entry(word.to_lowercase()).or_default();
            for syn in syns {
                if !list.contains(&syn) {
                    list.push(syn);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SynonymLookup for Thesaurus {
    fn synonyms(&self, word: &str) -> Result<Vec<String>> {
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_covers_seeds() {
        let t = Thesaurus::embedded();
        assert!(t.synonyms("ghost").unwrap().contains(&"spirit".to_string()));
        assert!(t.synonyms("nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_json_extends_embedded() {
        let mut t = Thesaurus::embedded();
        t.extend(Thesaurus::from_json(r#"{"ghost": ["poltergeist", "spirit"]}"#).unwrap());
        let syns = t.synonyms("ghost").unwrap();
        assert!(syns.contains(&"poltergeist".to_string()));
        assert_eq!(syns.iter().filter(|s| *s == "spirit").count(), 1);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Thesaurus::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let t = Thesaurus::load(Some(Path::new("/no/such/thesaurus.json")));
        assert_eq!(t.len(), Thesaurus::embedded().len());
    }
}
