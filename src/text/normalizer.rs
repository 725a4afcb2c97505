// Normalization pipeline: raw transcript text -> lemma tokens.
//
// Stages, each order-preserving:
//   1. tokenize (lowercase, contractions kept whole, minimum alphabetic length)
//   2. drop stopwords
//   3. drop tokens that aren't purely alphabetic (digits, mixed tokens)
//   4. lemmatize; rejected tokens and lemmas that end up too short are
//      dropped and counted
//
// Duplicates are kept: the output feeds a frequency count.

use tracing::debug;

use super::lemmatize::Lemmatizer;
use super::stopwords::StopwordSet;
use super::tokenize::{alphabetic_len, is_alphabetic_word, tokenize};
use crate::pipeline::outcome::StageErrors;

/// Lemma tokens for one text, plus the tokens that were rejected on the way.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub tokens: Vec<String>,
    pub errors: StageErrors,
}

/// Owns the stopword set and the lemmatizer (and through it, the lemma cache).
pub struct Normalizer {
    stopwords: StopwordSet,
    lemmatizer: Box<dyn Lemmatizer>,
    /// Minimum alphabetic characters for a token or lemma to be kept
    pub min_token_len: usize,
}

impl Normalizer {
    pub fn new(stopwords: StopwordSet, lemmatizer: Box<dyn Lemmatizer>, min_token_len: usize) -> Self {
        Self {
            stopwords,
            lemmatizer,
            min_token_len,
        }
    }

    pub fn lemmatizer_name(&self) -> &'static str {
        self.lemmatizer.name()
    }

    /// Run the full pipeline over one text.
    pub fn normalize(&self, text: &str) -> Normalized {
        let mut out = Normalized::default();

        let candidates = tokenize(text, self.min_token_len)
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .filter(|token| is_alphabetic_word(token));

        for token in candidates {
            let Some(lemma) = self.lemmatizer.lemmatize(&token, None).record(&mut out.errors) else {
                continue;
            };
            // Lemmatizing can shorten a token below the minimum ("we'll" -> "we")
            if alphabetic_len(&lemma) >= self.min_token_len {
                out.tokens.push(lemma);
            } else {
                out.errors.dropped_tokens += 1;
            }
        }

        if out.errors.dropped_tokens > 0 {
            debug!(
                dropped = out.errors.dropped_tokens,
                kept = out.tokens.len(),
                lemmatizer = self.lemmatizer.name(),
                "Tokens rejected during lemmatization"
            );
        }

        out
    }
}
