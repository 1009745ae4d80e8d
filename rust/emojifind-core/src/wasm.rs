//! JS bindings
//!
//! `EmojiFind` wraps the loaded data for a UI; `Preferences` wraps
//! `localStorage`. Records cross the boundary as plain objects (camelCase),
//! referenced by their catalog index.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::catalog::Catalog;
use crate::copy::CopyFormat;
use crate::data::EmojiData;
use crate::description::{description_url, Description, DescriptionOutcome};
use crate::model::SkinTone;
use crate::prefs::{LocalStorageStore, Preferences};
use crate::route::{details_path, resolve_route};

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiView {
    pub index: usize,
    pub id: String,
    pub emoji: String,
    pub title: String,
    pub code: Vec<String>,
    pub group: String,
    pub subgroup: String,
    pub modifiers: Vec<String>,
    pub keywords: Vec<String>,
    pub has_skin_tone_modifier: bool,
    pub variation_of: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgroupView {
    pub name: String,
    pub emojis: Vec<EmojiView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub name: String,
    pub subgroups: Vec<SubgroupView>,
}

/// Everything the details view shows apart from the description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsView {
    pub emoji: EmojiView,
    /// The base record, whose description and variants are shown
    pub main: EmojiView,
    pub variants: Vec<EmojiView>,
    pub related: Vec<EmojiView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub example: String,
}

pub fn emoji_view(catalog: &Catalog, idx: usize) -> Option<EmojiView> {
    let record = catalog.get(idx)?;
    Some(EmojiView {
        index: idx,
        id: record.id.clone(),
        emoji: record.glyph.clone(),
        title: record.title.clone(),
        code: record.code.clone(),
        group: record.group.clone(),
        subgroup: record.subgroup.clone(),
        modifiers: record.modifiers.clone(),
        keywords: record.keywords.clone(),
        has_skin_tone_modifier: record.has_skin_tone_modifier,
        variation_of: catalog.variation_of(idx),
    })
}

fn views(catalog: &Catalog, indices: impl IntoIterator<Item = usize>) -> Vec<EmojiView> {
    indices
        .into_iter()
        .filter_map(|idx| emoji_view(catalog, idx))
        .collect()
}

/// Browse view under a preferred tone
pub fn group_views(catalog: &Catalog, tone: SkinTone) -> Vec<GroupView> {
    catalog
        .groups()
        .iter()
        .map(|group| GroupView {
            name: group.name.clone(),
            subgroups: group
                .subgroups
                .iter()
                .map(|subgroup| SubgroupView {
                    name: subgroup.name.clone(),
                    emojis: views(
                        catalog,
                        catalog
                            .browsable(subgroup)
                            .flat_map(|idx| catalog.display_variants(idx, tone)),
                    ),
                })
                .collect(),
        })
        .collect()
}

pub fn details_view(data: &EmojiData, idx: usize) -> Option<DetailsView> {
    let catalog = data.catalog();
    let emoji = emoji_view(catalog, idx)?;
    let main = emoji_view(catalog, catalog.base_of(idx))?;
    Some(DetailsView {
        emoji,
        main,
        variants: views(catalog, catalog.all_variants(idx)),
        related: views(catalog, data.related(idx)),
    })
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_tone(tone: &str) -> Result<SkinTone, JsValue> {
    tone.parse().map_err(|e: String| JsValue::from_str(&e))
}

fn parse_format(format: &str) -> Result<CopyFormat, JsValue> {
    format.parse().map_err(|e: String| JsValue::from_str(&e))
}

// ============================================================================
// EmojiFind
// ============================================================================

#[wasm_bindgen]
pub struct EmojiFind {
    data: EmojiData,
}

#[wasm_bindgen]
impl EmojiFind {
    /// Load the shipped assets: groups table, emoji table, index snapshot
    #[wasm_bindgen(constructor)]
    pub fn new(groups_csv: &str, emoji_csv: &str, index_json: &str) -> Result<EmojiFind, JsValue> {
        let data = EmojiData::load(groups_csv, emoji_csv, index_json).map_err(|e| {
            web_sys::console::error_1(&format!("[EmojiFind] Load failed: {}", e).into());
            JsValue::from_str(&e.to_string())
        })?;

        web_sys::console::log_1(
            &format!(
                "[EmojiFind] Loaded {} emojis in {} groups",
                data.catalog().len(),
                data.catalog().groups().len()
            )
            .into(),
        );
        Ok(EmojiFind { data })
    }

    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.data.catalog().len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.data.catalog().is_empty()
    }

    /// Search results shown under `tone`. Empty for a blank query.
    #[wasm_bindgen]
    pub fn search(&self, query: &str, tone: &str) -> Result<JsValue, JsValue> {
        let tone = parse_tone(tone)?;
        let hits = self.data.search_with_tone(query, tone);
        to_js(&views(self.data.catalog(), hits))
    }

    /// Grouped browse view under `tone`
    #[wasm_bindgen]
    pub fn groups(&self, tone: &str) -> Result<JsValue, JsValue> {
        let tone = parse_tone(tone)?;
        to_js(&group_views(self.data.catalog(), tone))
    }

    #[wasm_bindgen(js_name = emojiByIndex)]
    pub fn emoji_by_index(&self, index: usize) -> Result<JsValue, JsValue> {
        to_js(&emoji_view(self.data.catalog(), index))
    }

    #[wasm_bindgen(js_name = emojiById)]
    pub fn emoji_by_id(&self, id: &str) -> Result<JsValue, JsValue> {
        let catalog = self.data.catalog();
        to_js(&catalog.index_of_id(id).and_then(|idx| emoji_view(catalog, idx)))
    }

    #[wasm_bindgen(js_name = displayVariants)]
    pub fn display_variants(&self, index: usize, tone: &str) -> Result<JsValue, JsValue> {
        let tone = parse_tone(tone)?;
        let catalog = self.data.catalog();
        to_js(&views(catalog, catalog.display_variants(index, tone)))
    }

    #[wasm_bindgen]
    pub fn related(&self, index: usize) -> Result<JsValue, JsValue> {
        to_js(&views(self.data.catalog(), self.data.related(index)))
    }

    /// Details view data, `null` for an unknown index
    #[wasm_bindgen]
    pub fn details(&self, index: usize) -> Result<JsValue, JsValue> {
        to_js(&details_view(&self.data, index))
    }

    #[wasm_bindgen(js_name = copyText)]
    pub fn copy_text(&self, glyph: &str, format: &str) -> Result<Option<String>, JsValue> {
        let format = parse_format(format)?;
        Ok(self.data.copy_text(glyph, format))
    }

    #[wasm_bindgen(js_name = resolveRoute)]
    pub fn resolve_route(&self, base: &str, pathname: &str) -> Result<JsValue, JsValue> {
        to_js(&resolve_route(self.data.catalog(), base, pathname))
    }
}

// ============================================================================
// Free functions
// ============================================================================

#[wasm_bindgen(js_name = detailsPath)]
pub fn details_path_js(base: &str, id: &str) -> String {
    details_path(base, id)
}

#[wasm_bindgen(js_name = descriptionUrl)]
pub fn description_url_js(base: &str, glyph: &str) -> String {
    description_url(base, glyph)
}

#[wasm_bindgen(js_name = parseDescription)]
pub fn parse_description(text: &str) -> Result<JsValue, JsValue> {
    to_js(&Description::parse(text))
}

/// Fetch and parse the description of a glyph. Always resolves to an
/// outcome object (`found`, `notFound`, `failed` or `cancelled`).
///
/// Pass the signal of an `AbortController` owned by the details view and
/// abort it on unmount: the request is dropped and the outcome is
/// `cancelled`, which callers must not apply.
#[wasm_bindgen(js_name = fetchDescription)]
pub async fn fetch_description(
    base: String,
    glyph: String,
    signal: Option<web_sys::AbortSignal>,
) -> Result<JsValue, JsValue> {
    let response = fetch_text(&description_url(&base, &glyph), signal.as_ref())
        .await
        .map_err(|e| {
            // fetch rejects with a TypeError on network failures
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
                .or_else(|| e.as_string())
                .unwrap_or_else(|| "Failed to load description".to_string())
        });
    let cancelled = signal.as_ref().is_some_and(web_sys::AbortSignal::aborted);
    to_js(&DescriptionOutcome::settle(response, cancelled))
}

async fn fetch_text(
    url: &str,
    signal: Option<&web_sys::AbortSignal>,
) -> Result<(u16, String, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let init = web_sys::RequestInit::new();
    init.set_signal(signal);
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await?
        .dyn_into()?;

    let status = response.status();
    let status_text = response.status_text();
    let body = if response.ok() {
        JsFuture::from(response.text()?).await?.as_string().unwrap_or_default()
    } else {
        String::new()
    };
    Ok((status, status_text, body))
}

#[wasm_bindgen(js_name = copyFormats)]
pub fn copy_formats() -> Result<JsValue, JsValue> {
    let options: Vec<OptionView> = CopyFormat::ALL
        .iter()
        .map(|format| OptionView {
            value: format.as_str().to_string(),
            label: format.label().to_string(),
            example: format.example().to_string(),
        })
        .collect();
    to_js(&options)
}

#[wasm_bindgen(js_name = skinTones)]
pub fn skin_tones() -> Result<JsValue, JsValue> {
    let options: Vec<OptionView> = SkinTone::ALL
        .iter()
        .map(|tone| OptionView {
            value: tone.as_str().to_string(),
            label: tone.as_str().to_string(),
            example: tone.swatch().to_string(),
        })
        .collect();
    to_js(&options)
}

// ============================================================================
// Preferences
// ============================================================================

#[wasm_bindgen(js_name = Preferences)]
pub struct BrowserPreferences {
    inner: Preferences<LocalStorageStore>,
}

#[wasm_bindgen(js_class = Preferences)]
impl BrowserPreferences {
    #[wasm_bindgen(js_name = fromLocalStorage)]
    pub fn from_local_storage() -> Result<BrowserPreferences, JsValue> {
        let store = LocalStorageStore::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(BrowserPreferences {
            inner: Preferences::new(store),
        })
    }

    #[wasm_bindgen(js_name = copyFormat)]
    pub fn copy_format(&self) -> String {
        self.inner.copy_format().to_string()
    }

    #[wasm_bindgen(js_name = setCopyFormat)]
    pub fn set_copy_format(&self, format: &str) -> Result<(), JsValue> {
        self.inner.set_copy_format(parse_format(format)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = skinTone)]
    pub fn skin_tone(&self) -> String {
        self.inner.skin_tone().to_string()
    }

    #[wasm_bindgen(js_name = setSkinTone)]
    pub fn set_skin_tone(&self, tone: &str) -> Result<(), JsValue> {
        self.inner.set_skin_tone(parse_tone(tone)?);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn query(&self) -> String {
        self.inner.query()
    }

    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&self, query: &str) {
        self.inner.set_query(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::NoDescriptions;
    use crate::interchange::read_records;
    use crate::search::{build_index, EmojiSearch};

    fn data() -> EmojiData {
        let groups = "id␜group␜subgroup\n0␜People & Body␜Hand Fingers Closed\n1␜Animals & Nature␜Animal Mammal\n";
        let emoji = "emoji␜group␜code␜title␜modifiers␜tone␜keywords\n\
                     👍␜0␜1F44D␜Thumbs␜␜false␜hand;thumb;up\n\
                     👍🏻␜0␜1F44D;1F3FB␜Thumbs: Light Skin Tone␜light skin tone␜true␜\n\
                     👍🏿␜0␜1F44D;1F3FF␜Thumbs: Dark Skin Tone␜dark skin tone␜true␜\n\
                     🐶␜1␜1F436␜Dog Face␜␜false␜dog;face;pet\n";
        let catalog = Catalog::build(read_records(groups, emoji).unwrap());
        let search = EmojiSearch::from_index(build_index(&catalog, &NoDescriptions).unwrap());
        EmojiData::from_parts(catalog, search)
    }

    fn glyphs(views: &[EmojiView]) -> Vec<&str> {
        views.iter().map(|v| v.emoji.as_str()).collect()
    }

    #[test]
    fn test_group_views_follow_tone() {
        let data = data();
        let light = group_views(data.catalog(), SkinTone::Light);
        assert_eq!(light.len(), 2);
        assert_eq!(glyphs(&light[0].subgroups[0].emojis), vec!["👍🏻"]);
        assert_eq!(glyphs(&light[1].subgroups[0].emojis), vec!["🐶"]);

        let medium = group_views(data.catalog(), SkinTone::Medium);
        assert_eq!(glyphs(&medium[0].subgroups[0].emojis), vec!["👍"]);
    }

    #[test]
    fn test_emoji_view_fields() {
        let data = data();
        let idx = data.catalog().index_of_glyph("👍🏿").unwrap();
        let view = emoji_view(data.catalog(), idx).unwrap();
        assert_eq!(view.id, "thumbs--dark-skin-tone");
        assert_eq!(view.variation_of, data.catalog().index_of_glyph("👍"));
        assert!(view.has_skin_tone_modifier);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("hasSkinToneModifier").is_some());
        assert!(json.get("variationOf").is_some());
    }

    #[test]
    fn test_details_view_of_variant() {
        let data = data();
        let idx = data.catalog().index_of_glyph("👍🏻").unwrap();
        let details = details_view(&data, idx).unwrap();
        assert_eq!(details.main.emoji, "👍");
        assert_eq!(glyphs(&details.variants), vec!["👍🏻", "👍🏿"]);
        assert!(!glyphs(&details.related).contains(&"👍🏻"));
        assert!(details_view(&data, 99).is_none());
    }
}
