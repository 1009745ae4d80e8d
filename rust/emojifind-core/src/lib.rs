//! Emoji Find core: Unicode emoji catalog + search
//!
//! A Rust/WASM implementation of the Emoji Find data pipeline and runtime.
//!
//! # Architecture
//!
//! ## Offline pipeline
//! - `unicode/` - Parsers for `emoji-test.txt` and CLDR annotation XML
//! - `pipeline.rs` - Export filter, interchange tables, index snapshot build
//! - `description.rs` - Description files, prompts for generating them
//!
//! ## Runtime
//! - `model.rs` - `EmojiRecord`, `SkinTone`, qualification status
//! - `catalog.rs` - Groups/subgroups and the skin-tone variant graph
//! - `interchange.rs` - The `␜`-delimited groups/emoji tables
//! - `search.rs` - Field-boosted prefix search over the catalog
//! - `data.rs` - `EmojiData::load`: tables + snapshot -> ready model
//! - `copy.rs` - Copy formats (glyph, code points, HTML entities, Java escapes)
//! - `prefs.rs` - Persisted preferences over a key-value store
//! - `route.rs` - Base-path aware URL helpers for the details view
//! - `wasm.rs` - JS bindings
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { EmojiFind, Preferences } from 'emojifind-core';
//!
//! await init();
//!
//! const app = new EmojiFind(groupsCsv, emojiCsv, indexJson);
//! const prefs = Preferences.fromLocalStorage();
//!
//! const results = app.search('thumbs');          // [] for an empty query
//! const text = app.copyText('👍', prefs.copyFormat());
//! const groups = app.groups(prefs.skinTone());    // browse view
//! ```

pub mod catalog;
pub mod copy;
pub mod data;
pub mod description;
pub mod error;
pub mod interchange;
pub mod model;
pub mod pipeline;
pub mod prefs;
pub mod route;
pub mod search;
pub mod unicode;
pub mod wasm;

pub use catalog::*;
pub use copy::*;
pub use data::*;
pub use description::*;
pub use error::*;
pub use interchange::*;
pub use model::*;
pub use pipeline::*;
pub use prefs::*;
pub use route::*;
pub use search::*;
pub use unicode::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("emojifind-core v{}", env!("CARGO_PKG_VERSION"))
}
