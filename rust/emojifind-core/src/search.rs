//! Emoji search
//!
//! Wires the catalog into a [`SearchIndex`]: which fields are indexed, how
//! they are boosted, and how hits map back to records. Only base records
//! are indexed; tone variants are reached through their base.

use emojifind_search::{Document, FieldParams, SearchConfig, SearchError, SearchIndex, SearchOptions};

use crate::catalog::Catalog;
use crate::description::DescriptionSource;
use crate::model::EmojiRecord;

/// Results shown for a query
pub const SEARCH_RESULT_LIMIT: usize = 300;
/// Related emojis shown on the details view
pub const RELATED_LIMIT: usize = 25;
/// Keywords of a record added to its related-emoji query
pub const RELATED_KEYWORDS: usize = 5;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_KEYWORDS: &str = "keywords";
pub const FIELD_EMOJI: &str = "emoji";
pub const FIELD_CODE: &str = "code";
pub const FIELD_SUBGROUP: &str = "subgroup";
pub const FIELD_GROUP: &str = "group";
pub const FIELD_DESCRIPTION: &str = "description";
pub const STORED_ID: &str = "id";

/// Index configuration for emoji: glyph as row id, title weighted highest
pub fn emoji_search_config() -> SearchConfig {
    SearchConfig {
        id_field: FIELD_EMOJI.to_string(),
        fields: vec![
            FieldParams::new(FIELD_TITLE, 13.0),
            FieldParams::new(FIELD_KEYWORDS, 8.0),
            FieldParams::new(FIELD_EMOJI, 5.0),
            FieldParams::new(FIELD_CODE, 3.0),
            FieldParams::new(FIELD_SUBGROUP, 2.0),
            FieldParams::new(FIELD_GROUP, 1.0),
            FieldParams::new(FIELD_DESCRIPTION, 1.0),
        ],
        store_fields: vec![STORED_ID.to_string()],
        prefix: true,
        ..SearchConfig::default()
    }
}

/// Index document of a record
pub fn emoji_document(record: &EmojiRecord, description: Option<&str>) -> Document {
    Document::new(&record.glyph)
        .with_field(FIELD_TITLE, &record.title)
        .with_field(FIELD_KEYWORDS, record.keywords.join(" "))
        .with_field(FIELD_EMOJI, &record.glyph)
        .with_field(FIELD_CODE, record.code.join(" "))
        .with_field(FIELD_SUBGROUP, &record.subgroup)
        .with_field(FIELD_GROUP, &record.group)
        .with_field(FIELD_DESCRIPTION, description.unwrap_or_default())
        .with_stored(STORED_ID, &record.id)
}

/// Index every base record, enriched with its description when one exists
pub fn build_index(
    catalog: &Catalog,
    descriptions: &impl DescriptionSource,
) -> Result<SearchIndex, SearchError> {
    let mut index = SearchIndex::new(emoji_search_config())?;
    let mut described = 0usize;

    for record in catalog.records().iter().filter(|r| !r.has_skin_tone_modifier) {
        let description = descriptions.description(&record.glyph);
        if description.is_some() {
            described += 1;
        }
        index.add(&emoji_document(record, description.as_deref()))?;
    }

    tracing::info!(
        documents = index.len(),
        described,
        terms = index.term_count(),
        "built search index"
    );
    Ok(index)
}

/// Query side of the emoji index
#[derive(Debug, Clone)]
pub struct EmojiSearch {
    index: SearchIndex,
}

impl EmojiSearch {
    pub fn from_index(index: SearchIndex) -> Self {
        Self { index }
    }

    /// Load a snapshot written by [`SearchIndex::to_json`]
    pub fn from_snapshot(json: &str) -> Result<Self, SearchError> {
        Ok(Self::from_index(SearchIndex::from_json(json)?))
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    fn hits(&self, catalog: &Catalog, query: &str, limit: Option<usize>) -> Vec<usize> {
        let options = SearchOptions {
            limit,
            ..SearchOptions::default()
        };
        self.index
            .search(query, &options)
            .into_iter()
            .filter_map(|hit| {
                let idx = catalog.index_of_glyph(&hit.id);
                if idx.is_none() {
                    tracing::debug!(id = %hit.id, "search hit without a record");
                }
                idx
            })
            .collect()
    }

    /// Records matching a user query, best first. A blank query matches
    /// nothing so the caller can show the browse view instead.
    pub fn search(&self, catalog: &Catalog, query: &str) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.hits(catalog, query, Some(SEARCH_RESULT_LIMIT))
    }

    /// Records similar to `idx`, found through its base's title and first
    /// keywords. The record itself is left out.
    pub fn related(&self, catalog: &Catalog, idx: usize) -> Vec<usize> {
        let Some(base) = catalog.get(catalog.base_of(idx)) else {
            return Vec::new();
        };
        let query = related_query(base);

        self.hits(catalog, &query, None)
            .into_iter()
            .filter(|&hit| hit != idx)
            .take(RELATED_LIMIT)
            .collect()
    }
}

/// Query used to find emojis related to `record`
pub fn related_query(record: &EmojiRecord) -> String {
    let mut query = record.title.to_lowercase();
    for keyword in record.keywords.iter().take(RELATED_KEYWORDS) {
        query.push(' ');
        query.push_str(keyword);
    }
    query
}
