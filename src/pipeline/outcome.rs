// Per-item outcomes and per-stage error counters.
//
// Parsing and normalization never abort a batch over a single bad item.
// Instead each item resolves to an Outcome, and every Skipped outcome is
// tallied into StageErrors so the final report can say how much was lost.

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Why an item was skipped. Each variant maps to one StageErrors counter.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// A caption block that doesn't match the block grammar
    MalformedBlock(String),
    /// A timestamp that couldn't be converted to seconds
    MalformedTimestamp(String),
    /// A caption shorter than the minimum duration
    ShortCaption { duration: f64 },
    /// A token the tagger or lemmatizer rejected
    RejectedToken(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedBlock(detail) => write!(f, "malformed block: {detail}"),
            SkipReason::MalformedTimestamp(raw) => write!(f, "malformed timestamp: '{raw}'"),
            SkipReason::ShortCaption { duration } => {
                write!(f, "caption too short ({duration:.3}s)")
            }
            SkipReason::RejectedToken(token) => write!(f, "rejected token: '{token}'"),
        }
    }
}

/// The result of processing one item: either a value or a recorded skip.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Kept(T),
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_kept(&self) -> bool {
        matches!(self, Outcome::Kept(_))
    }

    /// Take the value, or tally the skip into `errors` and return None.
    pub fn record(self, errors: &mut StageErrors) -> Option<T> {
        match self {
            Outcome::Kept(value) => Some(value),
            Outcome::Skipped(reason) => {
                errors.count(&reason);
                None
            }
        }
    }
}

/// Counters for every recoverable failure in the pipeline.
///
/// Counters are additive: merging two StageErrors sums each field, so the
/// per-episode counters can be reduced into a season total in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageErrors {
    pub malformed_blocks: usize,
    pub malformed_timestamps: usize,
    pub short_captions: usize,
    pub unreadable_files: usize,
    pub decode_replacements: usize,
    pub dropped_tokens: usize,
    pub synonym_failures: usize,
}

impl StageErrors {
    /// Bump the counter that corresponds to a skip reason.
    pub fn count(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::MalformedBlock(_) => self.malformed_blocks += 1,
            SkipReason::MalformedTimestamp(_) => self.malformed_timestamps += 1,
            SkipReason::ShortCaption { .. } => self.short_captions += 1,
            SkipReason::RejectedToken(_) => self.dropped_tokens += 1,
        }
    }

    /// Total number of recorded problems. Short captions are filtered on
    /// purpose, so they don't count as problems.
    pub fn total(&self) -> usize {
        self.malformed_blocks
            + self.malformed_timestamps
            + self.unreadable_files
            + self.decode_replacements
            + self.dropped_tokens
            + self.synonym_failures
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for StageErrors {
    fn add_assign(&mut self, other: Self) {
        self.malformed_blocks += other.malformed_blocks;
        self.malformed_timestamps += other.malformed_timestamps;
        self.short_captions += other.short_captions;
        self.unreadable_files += other.unreadable_files;
        self.decode_replacements += other.decode_replacements;
        self.dropped_tokens += other.dropped_tokens;
        self.synonym_failures += other.synonym_failures;
    }
}
