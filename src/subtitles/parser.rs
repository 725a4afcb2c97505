// SRT block parser.
//
// A caption block is:
//
//   <integer id>
//   <start> --> <end>
//   <one or more text lines>
//
// separated by blank lines. Each block resolves independently to an
// Outcome, so one broken block costs one caption, never the whole file.

use std::path::Path;
use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex_lite::Regex;
use tracing::{debug, warn};

use super::encoding;
use super::models::Caption;
use super::time::parse_time_range;
use crate::pipeline::outcome::{Outcome, SkipReason, StageErrors};

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static STYLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("valid style pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Captions extracted from one file, plus what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub captions: Vec<Caption>,
    pub errors: StageErrors,
    /// Encoding used to decode the file (None if it couldn't be read)
    pub encoding: Option<&'static str>,
}

/// SRT parser with configurable filtering.
pub struct SubtitleParser {
    /// Blocks shorter than this many seconds are dropped as artifacts
    pub min_duration: f64,
    /// Encoding to assume when detection has nothing to go on
    pub default_encoding: &'static Encoding,
}

impl Default for SubtitleParser {
    fn default() -> Self {
        Self {
            min_duration: 0.001,
            default_encoding: encoding_rs::UTF_8,
        }
    }
}

impl SubtitleParser {
    /// Parse a subtitle file. An unreadable file yields zero captions and
    /// one `unreadable_files` error rather than an Err.
    pub fn parse_file(&self, path: &Path) -> ParsedFile {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read subtitle file");
                return ParsedFile {
                    errors: StageErrors {
                        unreadable_files: 1,
                        ..Default::default()
                    },
                    ..Default::default()
                };
            }
        };

        let decoded = encoding::decode(&bytes, self.default_encoding);
        debug!(
            path = %path.display(),
            encoding = decoded.encoding,
            "Decoded subtitle file"
        );

        let mut parsed = self.parse_str(&decoded.text);
        parsed.encoding = Some(decoded.encoding);
        if decoded.had_replacements {
            parsed.errors.decode_replacements += 1;
            warn!(
                path = %path.display(),
                encoding = decoded.encoding,
                "Undecodable bytes replaced while reading subtitle file"
            );
        }
        parsed
    }

    /// Parse already-decoded SRT text.
    pub fn parse_str(&self, content: &str) -> ParsedFile {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let mut parsed = ParsedFile::default();

        for block in split_blocks(&normalized) {
            match self.parse_block(&block) {
                Outcome::Kept(caption) => parsed.captions.push(caption),
                Outcome::Skipped(reason) => {
                    debug!(%reason, "Skipping caption block");
                    parsed.errors.count(&reason);
                }
            }
        }

        if parsed.errors.malformed_blocks + parsed.errors.malformed_timestamps > 0 {
            warn!(
                captions = parsed.captions.len(),
                malformed_blocks = parsed.errors.malformed_blocks,
                malformed_timestamps = parsed.errors.malformed_timestamps,
                "Some caption blocks were skipped"
            );
        }

        parsed
    }

    /// Parse one block (its lines, blank lines already removed).
    pub fn parse_block(&self, lines: &[&str]) -> Outcome<Caption> {
        let [id_line, timing_line, text_lines @ ..] = lines else {
            return Outcome::Skipped(SkipReason::MalformedBlock(format!(
                "expected at least 3 lines, got {}",
                lines.len()
            )));
        };
        if text_lines.is_empty() {
            return Outcome::Skipped(SkipReason::MalformedBlock(format!(
                "caption '{}' has no text",
                id_line.trim()
            )));
        }

        let id: u32 = match id_line.trim().trim_start_matches('\u{feff}').parse() {
            Ok(id) => id,
            Err(_) => {
                return Outcome::Skipped(SkipReason::MalformedBlock(format!(
                    "bad caption id '{}'",
                    id_line.trim()
                )))
            }
        };

        if !timing_line.contains("-->") {
            return Outcome::Skipped(SkipReason::MalformedBlock(format!(
                "caption {id} has no timing line"
            )));
        }
        let (start, end) = match parse_time_range(timing_line) {
            Ok(range) => range,
            Err(e) => {
                warn!(caption = id, error = %e, "Malformed timestamp");
                return Outcome::Skipped(SkipReason::MalformedTimestamp(
                    timing_line.trim().to_string(),
                ));
            }
        };
        if end < start {
            return Outcome::Skipped(SkipReason::MalformedBlock(format!(
                "caption {id} ends before it starts"
            )));
        }

        let duration = end - start;
        if duration < self.min_duration {
            return Outcome::Skipped(SkipReason::ShortCaption { duration });
        }

        let text = clean_text(&text_lines.join("\n"));
        Outcome::Kept(Caption::new(id, start, end, text))
    }
}

/// Split normalized text into blocks of non-blank lines.
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Strip markup from caption text: tags, style markers, entities, extra
/// whitespace, and standalone numerals.
pub fn clean_text(raw: &str) -> String {
    let text = HTML_TAG.replace_all(raw, "");
    let text = STYLE_MARKER.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = WHITESPACE.replace_all(&text, " ");

    text.trim()
        .split(' ')
        .filter(|token| !is_numeral(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// A token made only of digits and numeric separators ("42", "3:00", "1,000").
fn is_numeral(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':'))
}
