//! Configuration types and defaults for the index
//!
//! A configuration is part of every snapshot, so a loaded index always scores
//! with the boosts it was built with.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::SearchError;

pub type F32 = f32;
pub type U32 = u32;
pub type FieldId = u16;

// =============================================================================
// Field Parameters
// =============================================================================

/// Parameters for an indexed field in BM25F scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Field name as it appears on documents
    pub name: String,
    /// Relevance boost (0 disables the field for scoring)
    pub boost: F32,
    /// Length normalization parameter b (default: 0.7)
    pub b: F32,
}

impl FieldParams {
    pub fn new(name: impl Into<String>, boost: F32) -> Self {
        Self {
            name: name.into(),
            boost,
            b: 0.7,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Index configuration: which fields are indexed, how they are weighted and
/// how query terms are expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Name of the unique row identifier
    pub id_field: String,
    /// Indexed fields, in field-id order
    pub fields: Vec<FieldParams>,
    /// Document values copied verbatim into results
    pub store_fields: Vec<String>,
    /// BM25 k1 parameter (term saturation). Default: 1.2
    pub k1: F32,
    /// Expand query terms to every indexed term they prefix. Default: false
    pub prefix: bool,
    /// Base weight of a prefix expansion relative to an exact hit. Default: 0.375
    pub prefix_weight: F32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            fields: vec![FieldParams::new("title", 2.0), FieldParams::new("content", 1.0)],
            store_fields: Vec::new(),
            k1: 1.2,
            prefix: false,
            prefix_weight: 0.375,
        }
    }
}

impl SearchConfig {
    /// Look up the field id of a named field
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| i as FieldId)
    }

    /// Reject configurations that cannot score anything sensibly
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.fields.is_empty() {
            return Err(SearchError::InvalidConfig("no indexed fields".into()));
        }
        if self.fields.len() > FieldId::MAX as usize {
            return Err(SearchError::InvalidConfig("too many fields".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SearchError::InvalidConfig(format!(
                    "duplicate field: {}",
                    field.name
                )));
            }
            if !field.boost.is_finite() || field.boost < 0.0 {
                return Err(SearchError::InvalidConfig(format!(
                    "invalid boost for {}: {}",
                    field.name, field.boost
                )));
            }
            if !(0.0..=1.0).contains(&field.b) {
                return Err(SearchError::InvalidConfig(format!(
                    "invalid b for {}: {}",
                    field.name, field.b
                )));
            }
        }

        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(SearchError::InvalidConfig(format!("invalid k1: {}", self.k1)));
        }
        if !(0.0..=1.0).contains(&self.prefix_weight) {
            return Err(SearchError::InvalidConfig(format!(
                "invalid prefix weight: {}",
                self.prefix_weight
            )));
        }
        Ok(())
    }
}
