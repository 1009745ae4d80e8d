//! Interchange tables
//!
//! Two text tables shipped to the runtime in place of the Unicode sources.
//! Fields are separated by `␜` (U+241C), list values by `;`, and each table
//! starts with a header row.
//!
//! ```text
//! id␜group␜subgroup
//! 0␜Smileys & Emotion␜Face Smiling
//!
//! emoji␜group␜code␜title␜modifiers␜tone␜keywords
//! 😀␜0␜1F600␜Grinning Face␜␜false␜face;grin;grinning face
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::error::InterchangeError;
use crate::model::{slug, EmojiRecord, Status};

pub const FIELD_SEPARATOR: char = '\u{241C}';
pub const LIST_SEPARATOR: char = ';';

pub const GROUPS_HEADER: &str = "id\u{241C}group\u{241C}subgroup";
pub const EMOJI_HEADER: &str = "emoji\u{241C}group\u{241C}code\u{241C}title\u{241C}modifiers\u{241C}tone\u{241C}keywords";

const GROUP_FIELDS: usize = 3;
const EMOJI_FIELDS: usize = 7;

/// The two tables as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterchangeTables {
    pub groups: String,
    pub emoji: String,
}

// =============================================================================
// Writing
// =============================================================================

/// Serialize records. Group ids are assigned in order of first appearance of
/// each (group, subgroup) pair.
pub fn write_tables(records: &[EmojiRecord]) -> Result<InterchangeTables, InterchangeError> {
    let mut group_ids: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups = String::from(GROUPS_HEADER);
    groups.push('\n');

    for record in records {
        let key = (record.group.as_str(), record.subgroup.as_str());
        if group_ids.contains_key(&key) {
            continue;
        }
        let id = group_ids.len();
        group_ids.insert(key, id);
        check_field(record, "group", &record.group)?;
        check_field(record, "subgroup", &record.subgroup)?;
        let _ = writeln!(
            groups,
            "{id}{sep}{}{sep}{}",
            record.group,
            record.subgroup,
            sep = FIELD_SEPARATOR
        );
    }

    let mut emoji = String::from(EMOJI_HEADER);
    emoji.push('\n');

    for record in records {
        let group_id = group_ids[&(record.group.as_str(), record.subgroup.as_str())];
        check_field(record, "emoji", &record.glyph)?;
        check_field(record, "title", &record.title)?;
        let _ = writeln!(
            emoji,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            record.glyph,
            group_id,
            join_list(record, "code", &record.code)?,
            record.title,
            join_list(record, "modifiers", &record.modifiers)?,
            record.has_skin_tone_modifier,
            join_list(record, "keywords", &record.keywords)?,
            sep = FIELD_SEPARATOR
        );
    }

    Ok(InterchangeTables { groups, emoji })
}

/// Values must survive the trip through a trimmed, separator-split row
fn check_field(record: &EmojiRecord, field: &'static str, value: &str) -> Result<(), InterchangeError> {
    let representable = !value.contains(FIELD_SEPARATOR)
        && !value.contains('\n')
        && !value.contains('\r')
        && value.trim() == value;
    if representable {
        Ok(())
    } else {
        Err(InterchangeError::Unrepresentable {
            glyph: record.glyph.clone(),
            field,
            value: value.to_string(),
        })
    }
}

fn join_list(
    record: &EmojiRecord,
    field: &'static str,
    values: &[String],
) -> Result<String, InterchangeError> {
    for value in values {
        if value.is_empty() || value.contains(LIST_SEPARATOR) {
            return Err(InterchangeError::Unrepresentable {
                glyph: record.glyph.clone(),
                field,
                value: value.clone(),
            });
        }
        check_field(record, field, value)?;
    }
    Ok(values.join(&LIST_SEPARATOR.to_string()))
}

// =============================================================================
// Reading
// =============================================================================

struct GroupRow {
    group: String,
    subgroup: String,
}

/// Rows of a table after the header, with 1-based line numbers
fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.trim()
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.split(FIELD_SEPARATOR).map(str::trim).collect()))
}

fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        value.split(LIST_SEPARATOR).map(str::to_string).collect()
    }
}

/// Rebuild records from the two tables. Every record comes back
/// fully-qualified, since nothing else is exported.
pub fn read_records(groups_text: &str, emoji_text: &str) -> Result<Vec<EmojiRecord>, InterchangeError> {
    let mut groups: HashMap<String, GroupRow> = HashMap::new();
    for (line, fields) in rows(groups_text) {
        if fields.len() != GROUP_FIELDS {
            tracing::debug!(line, fields = fields.len(), "skipping malformed group row");
            continue;
        }
        groups.insert(
            fields[0].to_string(),
            GroupRow {
                group: fields[1].to_string(),
                subgroup: fields[2].to_string(),
            },
        );
    }

    let mut records = Vec::new();
    for (line, fields) in rows(emoji_text) {
        if fields.len() != EMOJI_FIELDS {
            return Err(InterchangeError::MalformedRow {
                table: "emoji",
                line,
                expected: EMOJI_FIELDS,
                got: fields.len(),
            });
        }

        let group = groups
            .get(fields[1])
            .ok_or_else(|| InterchangeError::UnknownGroup {
                line,
                id: fields[1].to_string(),
            })?;

        let title = fields[3].to_string();
        records.push(EmojiRecord {
            id: slug(&title),
            glyph: fields[0].to_string(),
            code: split_list(fields[2]),
            group: group.group.clone(),
            subgroup: group.subgroup.clone(),
            status: Status::FullyQualified,
            title,
            modifiers: split_list(fields[4]),
            has_skin_tone_modifier: fields[5] == "true",
            keywords: split_list(fields[6]),
        });
    }

    tracing::debug!(records = records.len(), groups = groups.len(), "read interchange tables");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::has_skin_tone;

    fn record(glyph: &str, group: &str, subgroup: &str, title: &str, modifiers: &[&str], keywords: &[&str]) -> EmojiRecord {
        let modifiers: Vec<String> = modifiers.iter().map(|m| m.to_string()).collect();
        EmojiRecord {
            id: slug(title),
            glyph: glyph.into(),
            code: glyph.chars().map(|c| format!("{:04X}", c as u32)).collect(),
            group: group.into(),
            subgroup: subgroup.into(),
            status: Status::FullyQualified,
            title: title.into(),
            has_skin_tone_modifier: has_skin_tone(&modifiers),
            modifiers,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn sample() -> Vec<EmojiRecord> {
        vec![
            record("😀", "Smileys & Emotion", "Face Smiling", "Grinning Face", &[], &["face", "grin"]),
            record("👍", "People & Body", "Hand Fingers Closed", "Thumbs", &[], &["+1", "thumbs up"]),
            record("👍🏽", "People & Body", "Hand Fingers Closed", "Thumbs: Medium Skin Tone", &["medium skin tone"], &[]),
            record("😃", "Smileys & Emotion", "Face Smiling", "Grinning Face Big Eyes", &[], &[]),
        ]
    }

    #[test]
    fn test_write_layout() {
        let tables = write_tables(&sample()).unwrap();
        let group_lines: Vec<&str> = tables.groups.lines().collect();
        assert_eq!(
            group_lines,
            vec![
                GROUPS_HEADER,
                "0␜Smileys & Emotion␜Face Smiling",
                "1␜People & Body␜Hand Fingers Closed",
            ]
        );

        let emoji_lines: Vec<&str> = tables.emoji.lines().collect();
        assert_eq!(emoji_lines[0], EMOJI_HEADER);
        assert_eq!(emoji_lines[1], "😀␜0␜1F600␜Grinning Face␜␜false␜face;grin");
        assert_eq!(
            emoji_lines[3],
            "👍🏽␜1␜1F44D;1F3FD␜Thumbs: Medium Skin Tone␜medium skin tone␜true␜"
        );
        assert_eq!(emoji_lines[4], "😃␜0␜1F603␜Grinning Face Big Eyes␜␜false␜");
    }

    #[test]
    fn test_roundtrip() {
        let records = sample();
        let tables = write_tables(&records).unwrap();
        let restored = read_records(&tables.groups, &tables.emoji).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let groups = format!("{}\n0␜A␜B\n", GROUPS_HEADER);
        let emoji = format!("{}\n😀␜7␜1F600␜Grinning Face␜␜false␜\n", EMOJI_HEADER);
        let err = read_records(&groups, &emoji).unwrap_err();
        assert!(matches!(err, InterchangeError::UnknownGroup { line: 2, .. }));
    }

    #[test]
    fn test_short_emoji_row_is_an_error() {
        let groups = format!("{}\n0␜A␜B\n", GROUPS_HEADER);
        let emoji = format!("{}\n😀␜0␜1F600\n", EMOJI_HEADER);
        let err = read_records(&groups, &emoji).unwrap_err();
        assert!(matches!(err, InterchangeError::MalformedRow { got: 3, .. }));
    }

    #[test]
    fn test_malformed_group_rows_skipped() {
        let groups = format!("{}\n0␜A␜B\nbroken\n", GROUPS_HEADER);
        let emoji = format!("{}\n😀␜0␜1F600␜Grinning Face␜␜false␜\n", EMOJI_HEADER);
        let records = read_records(&groups, &emoji).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subgroup, "B");
    }

    #[test]
    fn test_empty_tables() {
        let records = read_records(GROUPS_HEADER, EMOJI_HEADER).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unrepresentable_keyword() {
        let mut records = sample();
        records[0].keywords.push("semi;colon".into());
        let err = write_tables(&records).unwrap_err();
        assert!(matches!(err, InterchangeError::Unrepresentable { field: "keywords", .. }));
    }
}
