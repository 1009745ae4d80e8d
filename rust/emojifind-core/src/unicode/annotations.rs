//! CLDR annotations
//!
//! Only plain keyword entries are read:
//! `<annotation cp="😀">face | grin</annotation>`. Text-to-speech entries
//! carry a `type="tts"` attribute and never match.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<annotation cp="([^"]+)">([^<]+)</annotation>"#)
        .expect("annotation pattern is valid")
});

/// Keyword lists keyed by glyph
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    keywords: HashMap<String, Vec<String>>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an annotation document. Later entries for a glyph replace
    /// earlier ones.
    pub fn parse(xml: &str) -> Self {
        let mut keywords = HashMap::new();
        for cap in ANNOTATION_RE.captures_iter(xml) {
            let glyph = unescape_xml(&cap[1]);
            let list = unescape_xml(cap[2].trim())
                .split(" | ")
                .map(str::to_string)
                .collect();
            keywords.insert(glyph, list);
        }
        tracing::debug!(entries = keywords.len(), "parsed annotations");
        Self { keywords }
    }

    /// Keywords for an exact glyph; empty when absent
    pub fn keywords(&self, glyph: &str) -> &[String] {
        self.keywords.get(glyph).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Resolve the five predefined XML entities
fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<ldml>
    <annotations>
        <annotation cp="😀">face | grin | grinning face</annotation>
        <annotation cp="😀" type="tts">grinning face</annotation>
        <annotation cp="&amp;">ampersand | and</annotation>
        <annotation cp="🐶">dog | face | pet</annotation>
    </annotations>
</ldml>
"#;

    #[test]
    fn test_parse_keywords() {
        let annotations = Annotations::parse(SAMPLE);
        assert_eq!(annotations.len(), 3);
        assert_eq!(annotations.keywords("😀"), ["face", "grin", "grinning face"]);
        assert_eq!(annotations.keywords("🐶"), ["dog", "face", "pet"]);
    }

    #[test]
    fn test_tts_entries_ignored() {
        let annotations = Annotations::parse(SAMPLE);
        assert_ne!(annotations.keywords("😀"), ["grinning face"]);
    }

    #[test]
    fn test_entities_unescaped() {
        let annotations = Annotations::parse(SAMPLE);
        assert_eq!(annotations.keywords("&"), ["ampersand", "and"]);
    }

    #[test]
    fn test_missing_glyph_is_empty() {
        let annotations = Annotations::parse(SAMPLE);
        assert!(annotations.keywords("🦄").is_empty());
        assert!(Annotations::new().is_empty());
    }

    #[test]
    fn test_later_entry_wins() {
        let xml = r#"<annotation cp="x">one</annotation><annotation cp="x">two | three</annotation>"#;
        assert_eq!(Annotations::parse(xml).keywords("x"), ["two", "three"]);
    }
}
