// Lexical knowledge base for the dictionary lemmatizer.
//
// Maps (surface form, part of speech) to a lemma. The embedded table covers
// irregular English forms that suffix rules get wrong; a TSV file
// (`form<TAB>pos<TAB>lemma`) can extend or override it.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::tagger::PartOfSpeech;

use PartOfSpeech::{Adjective as A, Adverb as R, Noun as N, Verb as V};

/// Irregular forms as (form, pos, lemma).
const IRREGULAR: &[(&str, PartOfSpeech, &str)] = &[
    // verbs: past tense and participles
    ("ran", V, "run"),
    ("went", V, "go"),
    ("gone", V, "go"),
    ("goes", V, "go"),
    ("came", V, "come"),
    ("coming", V, "come"),
    ("saw", V, "see"),
    ("seen", V, "see"),
    ("took", V, "take"),
    ("taken", V, "take"),
    ("taking", V, "take"),
    ("made", V, "make"),
    ("making", V, "make"),
    ("gave", V, "give"),
    ("given", V, "give"),
    ("knew", V, "know"),
    ("known", V, "know"),
    ("thought", V, "think"),
    ("brought", V, "bring"),
    ("bought", V, "buy"),
    ("caught", V, "catch"),
    ("taught", V, "teach"),
    ("fought", V, "fight"),
    ("found", V, "find"),
    ("left", V, "leave"),
    ("leaving", V, "leave"),
    ("felt", V, "feel"),
    ("kept", V, "keep"),
    ("slept", V, "sleep"),
    ("told", V, "tell"),
    ("sold", V, "sell"),
    ("held", V, "hold"),
    ("stood", V, "stand"),
    ("understood", V, "understand"),
    ("spoke", V, "speak"),
    ("spoken", V, "speak"),
    ("broke", V, "break"),
    ("broken", V, "break"),
    ("woke", V, "wake"),
    ("chose", V, "choose"),
    ("froze", V, "freeze"),
    ("frozen", V, "freeze"),
    ("wrote", V, "write"),
    ("written", V, "write"),
    ("drove", V, "drive"),
    ("driven", V, "drive"),
    ("rode", V, "ride"),
    ("hid", V, "hide"),
    ("hidden", V, "hide"),
    ("hiding", V, "hide"),
    ("ate", V, "eat"),
    ("eaten", V, "eat"),
    ("fell", V, "fall"),
    ("fallen", V, "fall"),
    ("began", V, "begin"),
    ("begun", V, "begin"),
    ("drank", V, "drink"),
    ("swam", V, "swim"),
    ("sang", V, "sing"),
    ("rang", V, "ring"),
    ("grew", V, "grow"),
    ("threw", V, "throw"),
    ("flew", V, "fly"),
    ("drew", V, "draw"),
    ("wore", V, "wear"),
    ("tore", V, "tear"),
    ("swore", V, "swear"),
    ("bit", V, "bite"),
    ("bitten", V, "bite"),
    ("shot", V, "shoot"),
    ("lost", V, "lose"),
    ("losing", V, "lose"),
    ("met", V, "meet"),
    ("paid", V, "pay"),
    ("said", V, "say"),
    ("heard", V, "hear"),
    ("sent", V, "send"),
    ("spent", V, "spend"),
    ("built", V, "build"),
    ("meant", V, "mean"),
    ("led", V, "lead"),
    ("fed", V, "feed"),
    ("fled", V, "flee"),
    ("bled", V, "bleed"),
    ("sat", V, "sit"),
    ("won", V, "win"),
    ("dug", V, "dig"),
    ("stuck", V, "stick"),
    ("struck", V, "strike"),
    ("died", V, "die"),
    ("dying", V, "die"),
    ("lying", V, "lie"),
    ("tied", V, "tie"),
    ("using", V, "use"),
    ("used", V, "use"),
    ("closing", V, "close"),
    ("closed", V, "close"),
    ("hoping", V, "hope"),
    ("hoped", V, "hope"),
    ("caring", V, "care"),
    ("cared", V, "care"),
    ("liked", V, "like"),
    ("living", V, "live"),
    ("lived", V, "live"),
    ("loving", V, "love"),
    ("loved", V, "love"),
    ("moving", V, "move"),
    ("moved", V, "move"),
    ("saving", V, "save"),
    ("saved", V, "save"),
    ("surviving", V, "survive"),
    ("survived", V, "survive"),
    ("believing", V, "believe"),
    ("believed", V, "believe"),
    ("scaring", V, "scare"),
    ("attacked", V, "attack"),
    ("became", V, "become"),
    ("forgot", V, "forget"),
    ("forgotten", V, "forget"),
    ("forgave", V, "forgive"),
    ("shook", V, "shake"),
    ("shaken", V, "shake"),
    // nouns: irregular plurals
    ("children", N, "child"),
    ("men", N, "man"),
    ("women", N, "woman"),
    ("feet", N, "foot"),
    ("teeth", N, "tooth"),
    ("mice", N, "mouse"),
    ("geese", N, "goose"),
    ("wolves", N, "wolf"),
    ("knives", N, "knife"),
    ("wives", N, "wife"),
    ("lives", N, "life"),
    ("leaves", N, "leaf"),
    ("thieves", N, "thief"),
    ("shelves", N, "shelf"),
    ("halves", N, "half"),
    ("selves", N, "self"),
    ("people", N, "people"),
    ("police", N, "police"),
    ("news", N, "news"),
    ("series", N, "series"),
    ("species", N, "species"),
    ("crises", N, "crisis"),
    ("houses", N, "house"),
    ("bodies", N, "body"),
    // adjectives: suppletive comparatives
    ("better", A, "good"),
    ("best", A, "good"),
    ("worse", A, "bad"),
    ("worst", A, "bad"),
    ("farther", A, "far"),
    ("further", A, "far"),
    ("elder", A, "old"),
    ("eldest", A, "old"),
    ("less", A, "little"),
    ("least", A, "little"),
    // adverbs
    ("better", R, "well"),
    ("best", R, "well"),
];

/// Lookup table from (form, part of speech) to lemma.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<(String, PartOfSpeech), String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Lexicon {
    /// The built-in table of irregular forms.
    pub fn embedded() -> Self {
        let entries = IRREGULAR
            .iter()
            .map(|&(form, pos, lemma)| ((form.to_string(), pos), lemma.to_string()))
            .collect();
        Self { entries }
    }

    /// The embedded table extended with a TSV file, if given and readable.
    /// A missing or unreadable file logs a warning and leaves the embedded
    /// table in place.
    pub fn load(path: Option<&Path>) -> Self {
        let mut lexicon = Self::embedded();
        let Some(path) = path else {
            return lexicon;
        };

        match lexicon.extend_from_file(path) {
            Ok(added) => debug!(path = %path.display(), added, "Loaded lexicon file"),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Lexicon unavailable, using the embedded table"
            ),
        }
        lexicon
    }

    /// Add every well-formed line of a TSV file; returns how many were added.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        Ok(self.extend_from_tsv(&content))
    }

    /// Parse `form<TAB>pos<TAB>lemma` lines. Malformed lines are skipped.
    pub fn extend_from_tsv(&mut self, content: &str) -> usize {
        let mut added = 0;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let [form, pos, lemma] = fields[..] else {
                debug!(line, "Skipping malformed lexicon line");
                continue;
            };
            let Some(pos) = PartOfSpeech::from_code(pos) else {
                debug!(line, "Skipping lexicon line with unknown part of speech");
                continue;
            };
            self.insert(form, pos, lemma);
            added += 1;
        }
        added
    }

    pub fn insert(&mut self, form: &str, pos: PartOfSpeech, lemma: &str) {
        self.entries
            .insert((form.trim().to_lowercase(), pos), lemma.trim().to_lowercase());
    }

    pub fn lookup(&self, form: &str, pos: PartOfSpeech) -> Option<&str> {
        self.entries
            .get(&(form.to_string(), pos))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The part of speech of an embedded irregular form, if it is one.
    /// Used by the tagger, so it only consults the built-in table.
    pub fn irregular_pos(form: &str) -> Option<PartOfSpeech> {
        IRREGULAR
            .iter()
            .find(|(f, _, _)| *f == form)
            .map(|&(_, pos, _)| pos)
    }
}
