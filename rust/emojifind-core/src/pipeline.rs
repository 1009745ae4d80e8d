//! Offline data preparation
//!
//! `emoji-test.txt` + CLDR annotations -> exported records -> interchange
//! tables, then records + descriptions -> index snapshot. File access is
//! left to the caller; everything here works on text.

use crate::catalog::Catalog;
use crate::description::DescriptionSource;
use crate::error::PipelineError;
use crate::interchange::{write_tables, InterchangeTables};
use crate::model::{EmojiRecord, Status};
use crate::search::build_index;
use crate::unicode::{parse_emoji_test, Annotations};

/// Glyphs kept out of the export (U+1FAEA, U+1FAC8)
pub const EXCLUDED_GLYPHS: [&str; 2] = ["\u{1FAEA}", "\u{1FAC8}"];

/// Counters reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub annotations: usize,
    pub parsed: usize,
    /// Data lines that did not match the grammar
    pub skipped: usize,
    pub exported: usize,
}

/// Result of [`prepare`]
#[derive(Debug, Clone)]
pub struct Prepared {
    pub records: Vec<EmojiRecord>,
    pub tables: InterchangeTables,
    pub stats: PrepareStats,
}

/// Whether a parsed record ships to the runtime
pub fn is_exported(record: &EmojiRecord) -> bool {
    record.status == Status::FullyQualified && !EXCLUDED_GLYPHS.contains(&record.glyph.as_str())
}

/// Parse both sources and write the interchange tables
pub fn prepare(emoji_test: &str, annotations_xml: &str) -> Result<Prepared, PipelineError> {
    let annotations = Annotations::parse(annotations_xml);
    let parsed = parse_emoji_test(emoji_test, &annotations);
    let total = parsed.emojis.len();

    let records: Vec<EmojiRecord> = parsed
        .emojis
        .into_iter()
        .map(|emoji| emoji.record)
        .filter(is_exported)
        .collect();

    if records.is_empty() {
        return Err(PipelineError::NoRecords);
    }

    let tables = write_tables(&records)?;
    let stats = PrepareStats {
        annotations: annotations.len(),
        parsed: total,
        skipped: parsed.skipped,
        exported: records.len(),
    };

    tracing::info!(
        parsed = stats.parsed,
        skipped = stats.skipped,
        exported = stats.exported,
        annotations = stats.annotations,
        "prepared emoji tables"
    );
    Ok(Prepared {
        records,
        tables,
        stats,
    })
}

/// Build the search index over `records` and serialize it
pub fn build_index_snapshot(
    records: Vec<EmojiRecord>,
    descriptions: &impl DescriptionSource,
) -> Result<String, PipelineError> {
    let catalog = Catalog::build(records);
    let index = build_index(&catalog, descriptions)?;
    Ok(index.to_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::NoDescriptions;

    const SOURCE: &str = "\
# group: Smileys & Emotion
# subgroup: face-smiling
1F600                                                  ; fully-qualified     # 😀 E1.0 grinning face
1FAEA                                                  ; fully-qualified     # \u{1FAEA} E16.0 distorted face
263A                                                   ; unqualified         # ☺ E0.6 smiling face
";

    #[test]
    fn test_prepare_filters_records() {
        let prepared = prepare(SOURCE, "").unwrap();
        assert_eq!(prepared.stats.parsed, 3);
        assert_eq!(prepared.stats.exported, 1);
        assert_eq!(prepared.records[0].title, "Grinning Face");
        assert_eq!(prepared.tables.emoji.lines().count(), 2);
    }

    #[test]
    fn test_prepare_without_records_fails() {
        let err = prepare("# group: Empty\n", "").unwrap_err();
        assert!(matches!(err, PipelineError::NoRecords));
    }

    #[test]
    fn test_snapshot_builds() {
        let prepared = prepare(SOURCE, "").unwrap();
        let json = build_index_snapshot(prepared.records, &NoDescriptions).unwrap();
        assert!(json.contains("grinning"));
    }
}
