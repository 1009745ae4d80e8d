//! `emoji-test.txt` parser
//!
//! The file is line oriented:
//!
//! ```text
//! # group: Smileys & Emotion
//! # subgroup: face-smiling
//! 1F600 ; fully-qualified     # 😀 E1.0 grinning face
//! 1F44D 1F3FD ; fully-qualified # 👍🏽 E1.0 thumbs up: medium skin tone
//! ```
//!
//! Marker lines update the current group/subgroup; other comments and blank
//! lines are skipped; data lines whose trailing comment does not have the
//! `<glyph> E<version> <name>[: <modifier>, ...]` shape are dropped.

use regex::Regex;
use std::sync::LazyLock;

use super::annotations::Annotations;
use super::title::{make_title, subgroup_title};
use crate::model::{has_skin_tone, slug, EmojiRecord, Status};

static DATA_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Group 1: code points, Group 2: status
    // Group 3: glyph, Group 4: version, Group 5: name + modifiers
    Regex::new(
        r"^\s*([0-9A-Fa-f]+(?:\s+[0-9A-Fa-f]+)*)\s*;\s*([A-Za-z-]+)\s*#\s*(\S+)\s+(E\d+\.\d+)\s+(.+?)\s*$",
    )
    .expect("data line pattern is valid")
});

// ==================== TYPE DEFINITIONS ====================

/// A parsed data line with the fields that do not travel to the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEmoji {
    pub record: EmojiRecord,
    /// Emoji version the glyph appeared in, e.g. "E1.0"
    pub version: String,
    /// Lower-case Unicode name without modifiers
    pub name: String,
    /// 1-based line number in the source
    pub line: usize,
}

/// Group/subgroup in effect for subsequent data lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    pub group: String,
    pub subgroup: String,
}

/// What a single line of the file is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    Group(&'a str),
    Subgroup(&'a str),
    Data,
}

/// Outcome of parsing a whole file
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    pub emojis: Vec<SourceEmoji>,
    /// Data lines dropped for not matching the grammar
    pub skipped: usize,
}

// ==================== PARSING ====================

/// Classify a raw line
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    match trimmed.strip_prefix('#') {
        Some(comment) => {
            let comment = comment.trim_start();
            if let Some(group) = comment.strip_prefix("group:") {
                LineKind::Group(group.trim())
            } else if let Some(subgroup) = comment.strip_prefix("subgroup:") {
                LineKind::Subgroup(subgroup.trim())
            } else {
                LineKind::Comment
            }
        }
        None => LineKind::Data,
    }
}

/// Parse one data line in the given context.
///
/// Pure: the same line, context and annotations always give the same record.
/// Returns `None` when the line does not match the data grammar.
pub fn parse_data_line(
    line: &str,
    line_number: usize,
    context: &ParseContext,
    annotations: &Annotations,
) -> Option<SourceEmoji> {
    let cap = DATA_LINE_RE.captures(line)?;

    let code: Vec<String> = cap[1]
        .split_whitespace()
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let status = Status::parse(&cap[2]);
    let glyph = cap[3].to_string();
    let version = cap[4].to_string();

    let (name, modifiers) = match cap[5].split_once(':') {
        Some((name, rest)) => (
            name.trim().to_string(),
            rest.split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>(),
        ),
        None => (cap[5].trim().to_string(), Vec::new()),
    };
    if name.is_empty() {
        return None;
    }

    let title = make_title(&name, &modifiers);
    let keywords = annotations.keywords(&glyph).to_vec();

    Some(SourceEmoji {
        record: EmojiRecord {
            id: slug(&title),
            has_skin_tone_modifier: has_skin_tone(&modifiers),
            glyph,
            code,
            group: context.group.clone(),
            subgroup: context.subgroup.clone(),
            status,
            title,
            modifiers,
            keywords,
        },
        version,
        name,
        line: line_number,
    })
}

/// Parse the whole file in order
pub fn parse_emoji_test(text: &str, annotations: &Annotations) -> ParsedSource {
    let mut context = ParseContext::default();
    let mut parsed = ParsedSource::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        match classify_line(line) {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Group(group) => context.group = group.to_string(),
            LineKind::Subgroup(subgroup) => context.subgroup = subgroup_title(subgroup),
            LineKind::Data => match parse_data_line(line, line_number, &context, annotations) {
                Some(emoji) => parsed.emojis.push(emoji),
                None => {
                    tracing::trace!(line = line_number, "skipping malformed data line");
                    parsed.skipped += 1;
                }
            },
        }
    }

    tracing::debug!(
        records = parsed.emojis.len(),
        skipped = parsed.skipped,
        "parsed emoji test data"
    );
    parsed
}
