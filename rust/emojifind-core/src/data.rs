//! Runtime loader
//!
//! Brings the shipped assets (groups table, emoji table, index snapshot)
//! back to the full in-memory model. Pure and synchronous: the same three
//! texts always give the same catalog and the same search results.

use crate::catalog::Catalog;
use crate::copy::{format_copy, CopyFormat};
use crate::error::LoadError;
use crate::interchange::read_records;
use crate::model::{EmojiRecord, SkinTone};
use crate::search::EmojiSearch;

/// Everything the app needs after start-up
#[derive(Debug, Clone)]
pub struct EmojiData {
    catalog: Catalog,
    search: EmojiSearch,
}

impl EmojiData {
    pub fn load(groups_text: &str, emoji_text: &str, index_json: &str) -> Result<Self, LoadError> {
        let records = read_records(groups_text, emoji_text)?;
        let catalog = Catalog::build(records);
        let search = EmojiSearch::from_snapshot(index_json)?;

        tracing::info!(
            emojis = catalog.len(),
            groups = catalog.groups().len(),
            indexed = search.index().len(),
            "loaded emoji data"
        );
        Ok(Self { catalog, search })
    }

    pub fn from_parts(catalog: Catalog, search: EmojiSearch) -> Self {
        Self { catalog, search }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get(&self, idx: usize) -> Option<&EmojiRecord> {
        self.catalog.get(idx)
    }

    pub fn search(&self, query: &str) -> Vec<usize> {
        self.search.search(&self.catalog, query)
    }

    /// Search results as shown under the preferred tone: each hit is
    /// replaced by its display variants.
    pub fn search_with_tone(&self, query: &str, tone: SkinTone) -> Vec<usize> {
        self.search(query)
            .into_iter()
            .flat_map(|idx| self.catalog.display_variants(idx, tone))
            .collect()
    }

    pub fn related(&self, idx: usize) -> Vec<usize> {
        self.search.related(&self.catalog, idx)
    }

    /// Text copied for a glyph, `None` for glyphs not in the catalog
    pub fn copy_text(&self, glyph: &str, format: CopyFormat) -> Option<String> {
        self.catalog
            .by_glyph(glyph)
            .map(|record| format_copy(record, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::{EMOJI_HEADER, GROUPS_HEADER};

    fn tables() -> (String, String) {
        let groups = format!("{}\n0␜People & Body␜Hand Fingers Closed\n", GROUPS_HEADER);
        let emoji = format!(
            "{}\n\
             👍␜0␜1F44D␜Thumbs␜␜false␜+1;hand;thumb;up\n\
             👍🏻␜0␜1F44D;1F3FB␜Thumbs: Light Skin Tone␜light skin tone␜true␜\n\
             👍🏽␜0␜1F44D;1F3FD␜Thumbs: Medium Skin Tone␜medium skin tone␜true␜\n",
            EMOJI_HEADER
        );
        (groups, emoji)
    }

    fn index_json(catalog: &Catalog) -> String {
        crate::search::build_index(catalog, &crate::description::NoDescriptions)
            .unwrap()
            .to_json()
            .unwrap()
    }

    #[test]
    fn test_load_rebuilds_variants() {
        let (groups, emoji) = tables();
        let catalog = Catalog::build(read_records(&groups, &emoji).unwrap());
        let data = EmojiData::load(&groups, &emoji, &index_json(&catalog)).unwrap();

        assert_eq!(data.catalog().len(), 3);
        let base = data.catalog().index_of_glyph("👍").unwrap();
        let medium = data.catalog().index_of_glyph("👍🏽").unwrap();
        assert_eq!(data.catalog().variation_of(medium), Some(base));
        assert_eq!(data.catalog().display_variants(base, SkinTone::Medium), vec![medium]);
    }

    #[test]
    fn test_search_with_tone() {
        let (groups, emoji) = tables();
        let catalog = Catalog::build(read_records(&groups, &emoji).unwrap());
        let data = EmojiData::load(&groups, &emoji, &index_json(&catalog)).unwrap();

        let light = data.catalog().index_of_glyph("👍🏻").unwrap();
        assert_eq!(data.search_with_tone("thumb", SkinTone::Light), vec![light]);
        let base = data.catalog().index_of_glyph("👍").unwrap();
        assert_eq!(data.search_with_tone("thumb", SkinTone::Dark), vec![base]);
        assert!(data.search_with_tone("", SkinTone::Light).is_empty());
    }

    #[test]
    fn test_copy_text() {
        let (groups, emoji) = tables();
        let catalog = Catalog::build(read_records(&groups, &emoji).unwrap());
        let data = EmojiData::load(&groups, &emoji, &index_json(&catalog)).unwrap();
        assert_eq!(
            data.copy_text("👍🏽", CopyFormat::UnicodeCodePoint).as_deref(),
            Some("U+1F44D U+1F3FD")
        );
        assert_eq!(data.copy_text("🦄", CopyFormat::Emoji), None);
    }

    #[test]
    fn test_bad_snapshot_is_an_error() {
        let (groups, emoji) = tables();
        let err = EmojiData::load(&groups, &emoji, "{not json").unwrap_err();
        assert!(matches!(err, LoadError::Search(_)));
    }

    #[test]
    fn test_bad_table_is_an_error() {
        let groups = format!("{}\n", GROUPS_HEADER);
        let emoji = format!("{}\n👍␜9␜1F44D␜Thumbs␜␜false␜\n", EMOJI_HEADER);
        let err = EmojiData::load(&groups, &emoji, "{}").unwrap_err();
        assert!(matches!(err, LoadError::Interchange(_)));
    }
}
