//! Term extraction
//!
//! Text is split on line breaks, Unicode separators and punctuation, then
//! lower-cased. Emoji glyphs and hexadecimal code points survive as terms.

use regex::Regex;
use std::sync::LazyLock;

static TERM_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\n\r\p{Z}\p{P}]+").expect("term separator pattern is valid")
});

/// Split text into lower-cased terms, dropping empty pieces
pub fn tokenize(text: &str) -> Vec<String> {
    TERM_SEPARATOR
        .split(text)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}
