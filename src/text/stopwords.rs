// Stopword set: general English list, spoken-dialogue fillers, and an
// optional user list.
//
// The embedded set is always present. The user list only ever adds words;
// if it can't be read we log a warning and carry on with the embedded set.

use std::collections::HashSet;
use std::path::Path;

use stop_words::{get, LANGUAGE};
use tracing::{debug, warn};

/// NLTK-style English list, including the apostrophe-less contraction
/// fragments ("don", "isn") that tokenizers leave behind.
const GENERAL: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Words that dominate spoken dialogue without carrying meaning:
/// contractions typed without apostrophes, interjections, and hedges.
const DIALOGUE_FILLERS: &[&str] = &[
    "dont", "cant", "wont", "im", "ive", "youre", "youve", "youll", "hes", "shes", "thats",
    "theres", "whats", "lets", "isnt", "arent", "wasnt", "werent", "didnt", "doesnt", "couldnt",
    "wouldnt", "shouldnt", "havent", "hasnt", "hadnt", "gonna", "wanna", "gotta", "kinda",
    "sorta", "yeah", "yep", "yup", "nope", "okay", "ok", "hey", "huh", "uh", "um", "umm", "hmm",
    "mmm", "ooh", "ahh", "aah", "whoa", "wow", "oh", "ah", "eh", "hi", "hello", "bye", "please",
    "thanks", "thank", "right", "well", "like", "just", "really", "actually", "know", "got",
    "get", "going", "thing", "things", "something", "anything", "nothing", "everything",
    "someone", "anyone", "everyone", "gotten", "y'all", "ya", "yo",
];

/// The set of words excluded from analysis.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::embedded()
    }
}

impl StopwordSet {
    /// The built-in set: the `stop-words` English list, the NLTK-style list,
    /// and dialogue fillers.
    pub fn embedded() -> Self {
        let mut words: HashSet<String> = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        words.extend(GENERAL.iter().map(|w| w.to_string()));
        words.extend(DIALOGUE_FILLERS.iter().map(|w| w.to_string()));
        Self { words }
    }

    /// An empty set, mostly useful for tests that need to see every token.
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// The embedded set plus the words in `path`, if given and readable.
    ///
    /// The file holds one word per line; blank lines and `#` comments are
    /// ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let mut set = Self::embedded();
        let Some(path) = path else {
            return set;
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let before = set.len();
                set.extend(parse_word_list(&content));
                debug!(
                    path = %path.display(),
                    added = set.len() - before,
                    "Loaded user stopword list"
                );
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Stopword list unavailable, using the embedded set"
                );
            }
        }
        set
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, words: I) {
        self.words.extend(words);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_covers_general_and_fillers() {
        let set = StopwordSet::embedded();
        assert!(set.contains("the"));
        assert!(set.contains("don't"));
        assert!(set.contains("gonna"));
        assert!(set.contains("yeah"));
        assert!(!set.contains("monster"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let set = StopwordSet::load(Some(Path::new("/definitely/not/here/stopwords")));
        assert_eq!(set.len(), StopwordSet::embedded().len());
    }

    #[test]
    fn test_parse_word_list_skips_comments() {
        let words = parse_word_list("# comment\nFoo\n\n  bar  \n");
        assert_eq!(words, vec!["foo".to_string(), "bar".to_string()]);
    }
}
