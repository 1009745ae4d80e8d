//! Core data structures for the index

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{FieldId, F32, U32};

/// Position of a document inside the index (insertion order)
pub type DocIdx = u32;

// =============================================================================
// Documents
// =============================================================================

/// A document handed to the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique row identifier
    pub id: String,
    /// Text of each indexed field (field name -> text)
    pub fields: BTreeMap<String, String>,
    /// Values to copy into results (field name -> value)
    pub stored: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.insert(name.into(), text.into());
        self
    }

    pub fn with_stored(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.stored.insert(name.into(), value.into());
        self
    }
}

/// What the index keeps of a document after tokenizing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    /// Field lengths in tokens, indexed by field id
    pub field_lengths: Vec<U32>,
    pub stored: BTreeMap<String, String>,
}

/// One (document, field) occurrence of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc: DocIdx,
    pub field: FieldId,
    pub tf: U32,
}

// =============================================================================
// Search
// =============================================================================

/// Per-query overrides
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Override the configured prefix matching
    pub prefix: Option<bool>,
}

/// Search result with document ID and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub score: F32,
    /// Indexed terms that contributed to the score
    pub terms: Vec<String>,
    pub stored: BTreeMap<String, String>,
}
