//! Catalog: grouping and the skin-tone variant graph
//!
//! Records are kept in source order in an arena; groups, subgroups and
//! variant links refer to them by index.
//!
//! Variant linking scans records in order, remembering the most recent
//! non-toned record per leading code point. A toned record is filed under
//! that base, once per tone its modifiers name. A toned record seen before
//! any base with its leading code point is left unlinked.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::model::{EmojiRecord, SkinTone};

// ==================== TYPE DEFINITIONS ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgroup {
    pub name: String,
    /// Record indices in first-seen order
    pub emojis: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub subgroups: Vec<Subgroup>,
}

impl Group {
    pub fn subgroup(&self, name: &str) -> Option<&Subgroup> {
        self.subgroups.iter().find(|s| s.name == name)
    }
}

/// Tone buckets of one base record
pub type VariantMap = BTreeMap<SkinTone, Vec<usize>>;

/// Emoji records with their groups and variant relationships
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<EmojiRecord>,
    groups: Vec<Group>,
    by_id: HashMap<String, usize>,
    by_glyph: HashMap<String, usize>,
    variation_of: Vec<Option<usize>>,
    variants: Vec<VariantMap>,
}

// ==================== CONSTRUCTION ====================

impl Catalog {
    /// Group records and link tone variants. Record order is preserved.
    pub fn build(records: Vec<EmojiRecord>) -> Self {
        let groups = group_records(&records);
        let (variation_of, variants) = link_variants(&records);

        // later records win on id collisions, the same as a map built in order
        let by_id = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id.clone(), idx))
            .collect();
        let by_glyph = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.glyph.clone(), idx))
            .collect();

        Self {
            records,
            groups,
            by_id,
            by_glyph,
            variation_of,
            variants,
        }
    }
}

fn group_records(records: &[EmojiRecord]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut subgroup_index: HashMap<(&str, &str), usize> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        let g = *group_index.entry(record.group.as_str()).or_insert_with(|| {
            groups.push(Group {
                name: record.group.clone(),
                subgroups: Vec::new(),
            });
            groups.len() - 1
        });

        let subgroups = &mut groups[g].subgroups;
        let s = *subgroup_index
            .entry((record.group.as_str(), record.subgroup.as_str()))
            .or_insert_with(|| {
                subgroups.push(Subgroup {
                    name: record.subgroup.clone(),
                    emojis: Vec::new(),
                });
                subgroups.len() - 1
            });

        subgroups[s].emojis.push(idx);
    }

    groups
}

fn link_variants(records: &[EmojiRecord]) -> (Vec<Option<usize>>, Vec<VariantMap>) {
    let mut variation_of = vec![None; records.len()];
    let mut variants = vec![VariantMap::new(); records.len()];
    let mut base_by_leading_code: HashMap<&str, usize> = HashMap::new();

    for (idx, record) in records.iter().enumerate() {
        let Some(leading) = record.leading_code() else {
            continue;
        };

        if !record.has_skin_tone_modifier {
            base_by_leading_code.insert(leading, idx);
            continue;
        }

        let Some(&base) = base_by_leading_code.get(leading) else {
            tracing::trace!(glyph = %record.glyph, "toned record has no base yet, not linked");
            continue;
        };

        if record.modifiers.is_empty() {
            variants[base].insert(SkinTone::Default, vec![idx]);
            link(&mut variation_of[idx], base);
            continue;
        }

        for tone in record.modifiers.iter().filter_map(|m| SkinTone::from_modifier(m)) {
            variants[base].entry(tone).or_default().push(idx);
            link(&mut variation_of[idx], base);
        }
    }

    (variation_of, variants)
}

/// A variant's base is set once and never reassigned
fn link(slot: &mut Option<usize>, base: usize) {
    if slot.is_none() {
        *slot = Some(base);
    }
}

// ==================== LOOKUPS ====================

impl Catalog {
    pub fn records(&self) -> &[EmojiRecord] {
        &self.records
    }

    pub fn get(&self, idx: usize) -> Option<&EmojiRecord> {
        self.records.get(idx)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn index_of_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn index_of_glyph(&self, glyph: &str) -> Option<usize> {
        self.by_glyph.get(glyph).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&EmojiRecord> {
        self.index_of_id(id).and_then(|idx| self.get(idx))
    }

    pub fn by_glyph(&self, glyph: &str) -> Option<&EmojiRecord> {
        self.index_of_glyph(glyph).and_then(|idx| self.get(idx))
    }

    // ==================== VARIANTS ====================

    /// Base record a tone variant belongs to
    pub fn variation_of(&self, idx: usize) -> Option<usize> {
        self.variation_of.get(idx).copied().flatten()
    }

    /// Tone buckets owned by a record (empty for variants and tone-less emoji)
    pub fn variants(&self, idx: usize) -> Option<&VariantMap> {
        self.variants.get(idx)
    }

    /// The record itself, or its base when it is a linked variant
    pub fn base_of(&self, idx: usize) -> usize {
        self.variation_of(idx).unwrap_or(idx)
    }

    /// What to show for a record under the preferred tone: the base's bucket
    /// for that tone when it has one, the record alone otherwise.
    pub fn display_variants(&self, idx: usize, tone: SkinTone) -> Vec<usize> {
        self.variants
            .get(idx)
            .and_then(|buckets| buckets.get(&tone))
            .cloned()
            .unwrap_or_else(|| vec![idx])
    }

    /// Every tone variant of a record's base, flattened in tone order
    pub fn all_variants(&self, idx: usize) -> Vec<usize> {
        let base = self.base_of(idx);
        self.variants
            .get(base)
            .map(|buckets| buckets.values().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Records listed in the grouped browse view: toned records are hidden
    /// because their base stands in for them.
    pub fn browsable<'a>(&'a self, subgroup: &'a Subgroup) -> impl Iterator<Item = usize> + 'a {
        subgroup
            .emojis
            .iter()
            .copied()
            .filter(move |&idx| !self.records[idx].has_skin_tone_modifier)
    }
}
