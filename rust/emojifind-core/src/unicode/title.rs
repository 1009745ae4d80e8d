//! Title-casing
//!
//! Words are capitalized, short function words are dropped, and each part of
//! a hyphenated word is capitalized too: "face with tears of joy" becomes
//! "Face Tears Joy", "medium-light skin tone" becomes "Medium-Light Skin Tone".

use std::collections::HashSet;
use std::sync::LazyLock;

static FUNCTION_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "of", "in", "on", "at", "by", "for", "up", "to", "with", "from",
        "over", "into", "upon", "and", "but", "or", "nor", "so", "yet", "as",
    ]
    .into_iter()
    .collect()
});

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-case a lower-case Unicode name
pub fn title_case(text: &str) -> String {
    let words: Vec<String> = text
        .split(' ')
        .filter(|word| !FUNCTION_WORDS.contains(word))
        .map(capitalize)
        .collect();

    words
        .join(" ")
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

/// `Name` or `Name: Modifier, Modifier`
pub fn make_title(name: &str, modifiers: &[String]) -> String {
    if modifiers.is_empty() {
        return title_case(name);
    }
    let modifiers: Vec<String> = modifiers.iter().map(|m| title_case(m)).collect();
    format!("{}: {}", title_case(name), modifiers.join(", "))
}

/// Subgroup marker text: hyphens become spaces, then title-cased
pub fn subgroup_title(raw: &str) -> String {
    title_case(&raw.trim().replace('-', " "))
}
