// Caption and transcript value types produced by the parser.

use serde::{Deserialize, Serialize};

/// One timed caption block after markup cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Sequence number from the subtitle file
    pub id: u32,
    pub start_seconds: f64,
    /// Always >= start_seconds
    pub end_seconds: f64,
    /// Cleaned text: no tags, no style markers, single-spaced
    pub text: String,
    /// Whitespace-separated words in the cleaned text
    pub word_count: usize,
    /// Speaking rate for this caption (0 if the duration is zero)
    pub words_per_minute: f64,
}

impl Caption {
    pub fn new(id: u32, start_seconds: f64, end_seconds: f64, text: String) -> Self {
        let word_count = text.split_whitespace().count();
        let duration = end_seconds - start_seconds;
        let words_per_minute = if duration > 0.0 {
            word_count as f64 * 60.0 / duration
        } else {
            0.0
        };
        Self {
            id,
            start_seconds,
            end_seconds,
            text,
            word_count,
            words_per_minute,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// All captions of one episode, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeTranscript {
    pub episode_id: String,
    pub captions: Vec<Caption>,
}

impl EpisodeTranscript {
    pub fn new(episode_id: impl Into<String>, captions: Vec<Caption>) -> Self {
        Self {
            episode_id: episode_id.into(),
            captions,
        }
    }

    /// The caption texts joined with single spaces, in caption order.
    pub fn full_text(&self) -> String {
        let texts: Vec<&str> = self
            .captions
            .iter()
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        texts.join(" ")
    }

    /// Seconds from the first caption's start to the last caption's end.
    pub fn total_duration(&self) -> f64 {
        match (self.captions.first(), self.captions.last()) {
            (Some(first), Some(last)) => (last.end_seconds - first.start_seconds).max(0.0),
            _ => 0.0,
        }
    }

    /// Sum of caption durations (time with text on screen).
    pub fn speaking_time(&self) -> f64 {
        self.captions.iter().map(Caption::duration).sum()
    }

    pub fn word_count(&self) -> usize {
        self.captions.iter().map(|c| c.word_count).sum()
    }

    /// Raw (pre-normalization) words per minute of speaking time.
    pub fn words_per_minute(&self) -> f64 {
        let speaking = self.speaking_time();
        if speaking > 0.0 {
            self.word_count() as f64 * 60.0 / speaking
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_pacing() {
        let c = Caption::new(1, 10.0, 13.0, "we have to go now".to_string());
        assert_eq!(c.word_count, 5);
        // 5 words in 3 seconds = 100 wpm
        assert!((c.words_per_minute - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_duration_caption_has_zero_rate() {
        let c = Caption::new(1, 5.0, 5.0, "hello".to_string());
        assert_eq!(c.words_per_minute, 0.0);
    }

    #[test]
    fn test_transcript_metrics() {
        let t = EpisodeTranscript::new(
            "01",
            vec![
                Caption::new(1, 0.0, 2.0, "one two".to_string()),
                Caption::new(2, 10.0, 12.0, "three four".to_string()),
            ],
        );
        assert_eq!(t.full_text(), "one two three four");
        assert!((t.total_duration() - 12.0).abs() < 0.001);
        assert!((t.speaking_time() - 4.0).abs() < 0.001);
        assert!((t.words_per_minute() - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_transcript() {
        let t = EpisodeTranscript::new("01", vec![]);
        assert_eq!(t.full_text(), "");
        assert_eq!(t.total_duration(), 0.0);
        assert_eq!(t.words_per_minute(), 0.0);
    }
}
