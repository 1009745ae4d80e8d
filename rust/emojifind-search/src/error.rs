use thiserror::Error;

/// Errors raised while building, encoding or decoding an index
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Duplicate document ID: {0}")]
    DuplicateId(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported snapshot version: {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
