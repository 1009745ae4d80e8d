//! emojifind-search: field-weighted full-text index
//!
//! A small BM25F index with prefix matching and serializable snapshots. The
//! index is built once offline, written as JSON and loaded verbatim at
//! runtime without re-tokenizing anything.
//!
//! # Architecture
//! - `config.rs` - Field boosts, saturation and prefix parameters
//! - `types.rs` - Documents, postings, results and search options
//! - `math.rs` - IDF, length normalization, saturation, prefix weighting
//! - `tokenize.rs` - Term extraction shared by indexing and querying
//! - `index.rs` - `SearchIndex`: add, search, snapshot
//!
//! # Usage
//! ```
//! use emojifind_search::{Document, FieldParams, SearchConfig, SearchIndex, SearchOptions};
//!
//! let config = SearchConfig {
//!     id_field: "emoji".into(),
//!     fields: vec![FieldParams::new("title", 2.0), FieldParams::new("keywords", 1.0)],
//!     prefix: true,
//!     ..SearchConfig::default()
//! };
//! let mut index = SearchIndex::new(config).unwrap();
//! index
//!     .add(&Document::new("😀").with_field("title", "Grinning Face").with_field("keywords", "face grin"))
//!     .unwrap();
//!
//! let results = index.search("grin", &SearchOptions::default());
//! assert_eq!(results[0].id, "😀");
//! ```

mod config;
mod error;
mod index;
mod math;
mod tokenize;
mod types;

pub use config::*;
pub use error::*;
pub use index::*;
pub use math::*;
pub use tokenize::*;
pub use types::*;

#[cfg(test)]
mod tests;
