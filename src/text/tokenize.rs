// Word tokenizer that keeps contractions whole.
//
// "don't" stays one token instead of splitting into "don" and "t", which
// matters because the stopword list knows "don't" but not "t". Any Unicode
// letter or digit is a word character, so "café" stays one word.

/// Lowercase `text` and extract word spans with at least `min_alpha`
/// alphabetic characters.
pub fn tokenize(text: &str, min_alpha: usize) -> Vec<String> {
    let folded = fold_apostrophes(&text.to_lowercase());

    word_spans(&folded)
        .into_iter()
        .filter(|token| alphabetic_len(token) >= min_alpha)
        .map(str::to_string)
        .collect()
}

/// Runs of alphanumeric characters joined by single internal apostrophes.
fn word_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_alphanumeric() {
            start.get_or_insert(i);
            continue;
        }
        let Some(s) = start else {
            continue;
        };
        let joins = c == '\'' && chars.peek().is_some_and(|&(_, next)| next.is_alphanumeric());
        if !joins {
            spans.push(&text[s..i]);
            start = None;
        }
    }
    if let Some(s) = start {
        spans.push(&text[s..]);
    }
    spans
}

/// True when the token is made of letters and internal apostrophes only.
pub fn is_alphabetic_word(token: &str) -> bool {
    !token.is_empty()
        && token.chars().any(char::is_alphabetic)
        && token.chars().all(|c| c.is_alphabetic() || c == '\'')
}

pub fn alphabetic_len(token: &str) -> usize {
    token.chars().filter(|c| c.is_alphabetic()).count()
}

/// Map typographic apostrophes to ASCII so "don’t" tokenizes like "don't".
fn fold_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}', '`'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contractions_stay_whole() {
        assert_eq!(
            tokenize("Don't go, they're HERE!", 1),
            vec!["don't", "go", "they're", "here"]
        );
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(tokenize("Don’t", 1), vec!["don't"]);
    }

    #[test]
    fn test_edge_apostrophes_are_dropped() {
        assert_eq!(tokenize("'tis the hunters' moon", 3), vec!["tis", "the", "hunters", "moon"]);
    }

    #[test]
    fn test_min_alpha_length() {
        assert_eq!(tokenize("go run 42 abc1", 3), vec!["run", "abc1"]);
    }

    #[test]
    fn test_accented_words_stay_whole() {
        assert_eq!(
            tokenize("Her résumé from the café was naïve", 3),
            vec!["her", "résumé", "from", "the", "café", "was", "naïve"]
        );
    }

    #[test]
    fn test_double_apostrophe_splits() {
        assert_eq!(tokenize("rock''n", 1), vec!["rock", "n"]);
    }

    #[test]
    fn test_is_alphabetic_word() {
        assert!(is_alphabetic_word("don't"));
        assert!(is_alphabetic_word("monster"));
        assert!(!is_alphabetic_word("abc1"));
        assert!(!is_alphabetic_word("123"));
        assert!(!is_alphabetic_word(""));
        assert!(is_alphabetic_word("naïve"));
    }
}
