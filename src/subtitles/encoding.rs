// Charset detection and lossy decoding for subtitle files.
//
// Subtitle files in the wild come in UTF-8, UTF-16 with a BOM, and a long
// tail of legacy single-byte encodings (Windows-1252 mostly). We sniff a BOM
// first, accept valid UTF-8 as-is, and only then ask chardetng to guess.
// Decoding always succeeds: undecodable sequences become U+FFFD.

use encoding_rs::{Encoding, UTF_8};

/// How many leading bytes the detector looks at.
const SAMPLE_BYTES: usize = 64 * 1024;

/// Decoded file content plus what we learned while decoding it.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    /// Name of the encoding that was used (e.g. "UTF-8", "windows-1252")
    pub encoding: &'static str,
    /// True when at least one byte sequence was replaced with U+FFFD
    pub had_replacements: bool,
}

/// Pick the encoding for a byte buffer.
///
/// Falls back to `default` when the sample is pure ASCII, since then there's
/// nothing for the detector to go on.
pub fn detect(bytes: &[u8], default: &'static Encoding) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let sample = &bytes[..bytes.len().min(SAMPLE_BYTES)];
    if sample.is_ascii() {
        return default;
    }
    if is_utf8_sample(sample) {
        return UTF_8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Detect and decode in one step.
pub fn decode(bytes: &[u8], default: &'static Encoding) -> Decoded {
    let encoding = detect(bytes, default);
    // decode() strips a matching BOM and replaces malformed sequences
    let (text, used, had_replacements) = encoding.decode(bytes);
    Decoded {
        text: text.into_owned(),
        encoding: used.name(),
        had_replacements,
    }
}

/// Resolve a configured encoding label, defaulting to UTF-8 for unknown labels.
pub fn encoding_for_label(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or(UTF_8)
}

/// Valid UTF-8, allowing a multi-byte character cut off by the sample boundary.
fn is_utf8_sample(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && sample.len() == SAMPLE_BYTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let decoded = decode("café olé".as_bytes(), UTF_8);
        assert_eq!(decoded.text, "café olé");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.had_replacements);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"hello");
        let decoded = decode(&bytes, UTF_8);
        assert_eq!(decoded.text, "hello");
    }

    #[test]
    fn test_utf16_bom() {
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        let decoded = decode(&bytes, UTF_8);
        assert_eq!(decoded.text, "hi");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }

    #[test]
    fn test_legacy_bytes_decode_without_failing() {
        // "café" in Windows-1252: 0xE9 is not valid UTF-8 on its own
        let bytes = b"caf\xE9 au lait, tr\xE8s bien, na\xEFve";
        let decoded = decode(bytes, UTF_8);
        assert!(decoded.text.starts_with("caf"));
        assert_ne!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn test_ascii_uses_default() {
        let latin1 = encoding_for_label("latin1");
        assert_eq!(detect(b"plain text", latin1).name(), "windows-1252");
    }

    #[test]
    fn test_unknown_label_defaults_to_utf8() {
        assert_eq!(encoding_for_label("no-such-charset"), UTF_8);
        assert_eq!(encoding_for_label("latin1").name(), "windows-1252");
    }
}
