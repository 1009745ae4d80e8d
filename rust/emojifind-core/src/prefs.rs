//! Persisted user preferences
//!
//! Three JSON-encoded values under the `emoji-find-` prefix of a key-value
//! store. Reads fall back to defaults on any problem; writes that fail are
//! logged and otherwise ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::copy::CopyFormat;
use crate::error::PreferenceError;
use crate::model::SkinTone;

pub const STORAGE_PREFIX: &str = "emoji-find-";

pub const COPY_FORMAT_KEY: &str = "copy-format";
pub const SKIN_TONE_KEY: &str = "skin-tone";
pub const QUERY_KEY: &str = "query";

// =============================================================================
// Stores
// =============================================================================

/// String key-value storage scoped to one origin
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Store kept in memory, for native use and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The browser's `window.localStorage`
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn new(storage: web_sys::Storage) -> Self {
        Self { storage }
    }

    /// Local storage of the current window
    pub fn from_window() -> Result<Self, PreferenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PreferenceError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| PreferenceError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| PreferenceError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self::new(storage))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PreferenceError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Options that shape what is shown and copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub copy_format: CopyFormat,
    pub skin_tone: SkinTone,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            copy_format: CopyFormat::Emoji,
            skin_tone: SkinTone::Light,
        }
    }
}

/// Typed access to the stored preferences
pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(&prefixed_key(key))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring unreadable preference");
                None
            }
        }
    }

    fn try_write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PreferenceError> {
        let json = serde_json::to_string(value).map_err(|source| PreferenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(&prefixed_key(key), &json)
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            tracing::warn!(error = %e, "preference not saved");
        }
    }

    pub fn copy_format(&self) -> CopyFormat {
        self.read(COPY_FORMAT_KEY).unwrap_or_default()
    }

    pub fn set_copy_format(&self, format: CopyFormat) {
        self.write(COPY_FORMAT_KEY, &format);
    }

    pub fn skin_tone(&self) -> SkinTone {
        self.read(SKIN_TONE_KEY).unwrap_or(Options::default().skin_tone)
    }

    pub fn set_skin_tone(&self, tone: SkinTone) {
        self.write(SKIN_TONE_KEY, &tone);
    }

    /// Last search query
    pub fn query(&self) -> String {
        self.read(QUERY_KEY).unwrap_or_default()
    }

    pub fn set_query(&self, query: &str) {
        self.write(QUERY_KEY, &query);
    }

    pub fn options(&self) -> Options {
        Options {
            copy_format: self.copy_format(),
            skin_tone: self.skin_tone(),
        }
    }

    pub fn set_options(&self, options: Options) {
        self.set_copy_format(options.copy_format);
        self.set_skin_tone(options.skin_tone);
    }
}

pub fn prefixed_key(key: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, key)
}
