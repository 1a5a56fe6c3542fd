//! Local preference storage.
//!
//! The browser's `localStorage` is reached through [`BrowserStorage`]; tests
//! and non-browser hosts use [`MemoryStore`]. Values are plain strings; typed
//! preferences encode themselves as JSON.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PrefsError;

pub const TIMEZONE_KEY: &str = "app-timezone";
pub const VISIBLE_COLUMNS_KEY: &str = "budget.visibleColumnIds";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        if !cfg!(target_arch = "wasm32") {
            return None;
        }
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let storage = Self::storage().ok_or(PrefsError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| PrefsError::Write {
            key: key.to_string(),
            message: err.as_string().unwrap_or_else(|| "quota exceeded".to_string()),
        })
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring unreadable preference");
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(value).map_err(|err| PrefsError::Encode {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trips_through_memory_store() {
        let store = MemoryStore::new();
        save_json(&store, "k", &vec!["a", "b"]).unwrap();
        let loaded: Option<Vec<String>> = load_json(&store, "k");
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn unreadable_json_is_treated_as_missing() {
        let store = MemoryStore::with("k", "{not json");
        let loaded: Option<Vec<String>> = load_json(&store, "k");
        assert!(loaded.is_none());
    }

    #[test]
    fn browser_storage_is_absent_off_wasm() {
        assert_eq!(BrowserStorage.get(TIMEZONE_KEY), None);
        assert_eq!(BrowserStorage.set(TIMEZONE_KEY, "UTC"), Err(PrefsError::Unavailable));
    }
}
