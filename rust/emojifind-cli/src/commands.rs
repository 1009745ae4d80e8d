//! Offline commands working on files

use anyhow::{Context, Result};
use emojifind_core::{
    build_index_snapshot, format_copy, prepare, read_records, CopyFormat, DirectorySource,
    EmojiData, PrepareStats, SkinTone,
};

use crate::assets::{read_text, write_text, AssetPaths, InputPaths};

/// `emoji-test.txt` + `en.xml` -> `groups.csv` + `emoji.csv`
pub fn run_prepare(input: &InputPaths, assets: &AssetPaths) -> Result<PrepareStats> {
    let emoji_test = read_text(&input.emoji_test())?;
    let annotations = read_text(&input.annotations())?;

    let prepared = prepare(&emoji_test, &annotations).context("failed to prepare emoji tables")?;

    write_text(&assets.groups(), &prepared.tables.groups)?;
    write_text(&assets.emoji(), &prepared.tables.emoji)?;
    tracing::info!(
        groups = %assets.groups().display(),
        emoji = %assets.emoji().display(),
        "wrote interchange tables"
    );
    Ok(prepared.stats)
}

/// Tables + `desc/` -> `index.json`
pub fn run_index(assets: &AssetPaths) -> Result<()> {
    let groups = read_text(&assets.groups())?;
    let emoji = read_text(&assets.emoji())?;
    let records = read_records(&groups, &emoji).context("invalid emoji tables")?;

    let descriptions = DirectorySource::new(assets.descriptions());
    let snapshot = build_index_snapshot(records, &descriptions).context("failed to build index")?;

    write_text(&assets.index(), &snapshot)?;
    tracing::info!(path = %assets.index().display(), bytes = snapshot.len(), "wrote search index");
    Ok(())
}

/// Load the assets the way the app does
pub fn load_assets(assets: &AssetPaths) -> Result<EmojiData> {
    let groups = read_text(&assets.groups())?;
    let emoji = read_text(&assets.emoji())?;
    let index = read_text(&assets.index())?;
    EmojiData::load(&groups, &emoji, &index).context("failed to load assets")
}

/// One printed search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLine {
    pub glyph: String,
    pub title: String,
    pub copied: String,
}

pub fn run_search(
    assets: &AssetPaths,
    query: &str,
    tone: SkinTone,
    format: CopyFormat,
    limit: usize,
) -> Result<Vec<SearchLine>> {
    let data = load_assets(assets)?;
    let lines = data
        .search_with_tone(query, tone)
        .into_iter()
        .filter_map(|idx| data.get(idx))
        .take(limit)
        .map(|record| SearchLine {
            glyph: record.glyph.clone(),
            title: record.title.clone(),
            copied: format_copy(record, format),
        })
        .collect();
    Ok(lines)
}
