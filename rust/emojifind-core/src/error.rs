//! Error types for the catalog, loader and preferences.
//!
//! Malformed lines of the Unicode source never surface here: the parser skips
//! them. These errors cover inputs the pipeline itself produced.

use emojifind_search::SearchError;
use thiserror::Error;

/// Problems reading or writing the interchange tables
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("Malformed {table} row at line {line}: expected {expected} fields, got {got}")]
    MalformedRow {
        table: &'static str,
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("Emoji row at line {line} references unknown group id {id:?}")]
    UnknownGroup { line: usize, id: String },

    #[error("Value of {field} for {glyph} cannot be written: {value:?}")]
    Unrepresentable {
        glyph: String,
        field: &'static str,
        value: String,
    },
}

/// Failure to bring up the runtime model
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid emoji tables: {0}")]
    Interchange(#[from] InterchangeError),

    #[error("Invalid search index: {0}")]
    Search(#[from] SearchError),
}

/// Failure of an offline pipeline step
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No emoji records found in the Unicode source")]
    NoRecords,

    #[error(transparent)]
    Interchange(#[from] InterchangeError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Failure writing a preference
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Could not encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write {key}: {message}")]
    Write { key: String, message: String },
}
