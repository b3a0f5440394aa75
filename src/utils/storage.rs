// ============================================================================
// STORAGE - Persistent key/value storage (localStorage in the browser)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use serde::{Serialize, de::DeserializeOwned};
use web_sys::{window, Storage};
use crate::error::{ClientError, ClientResult};

/// Raw string storage. Every cache and the session sit on top of this seam so
/// they can run against an in-memory map outside the browser.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str);
}

/// Serialize `value` as JSON under `key`
pub fn save_to_storage<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> ClientResult<()> {
    let json = serde_json::to_string(value)?;
    store.set_item(key, &json)
}

/// Load JSON from `key`. Missing and corrupt entries both read as `None`.
pub fn load_from_storage<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Entrada corrupta en '{}': {}", key, e);
            None
        }
    }
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage`. Access errors (private mode, quota) are logged and
/// swallowed on read/remove; writes report them.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let storage = get_local_storage()
            .ok_or_else(|| ClientError::Storage("localStorage no disponible".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| ClientError::Storage(format!("No se pudo guardar '{}'", key)))
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("⚠️ [STORAGE] No se pudo eliminar '{}'", key);
            }
        }
    }
}

/// In-memory store, used off-browser and in tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: i64,
        name: String,
    }

    #[test]
    fn json_entries_round_through_the_store() {
        let store = MemoryStorage::new();
        save_to_storage(&store, "k", &Sample { id: 3, name: "a".into() }).unwrap();
        assert_eq!(load_from_storage::<Sample>(&store, "k"), Some(Sample { id: 3, name: "a".into() }));
    }

    #[test]
    fn corrupt_entry_reads_as_missing() {
        let store = MemoryStorage::new();
        store.set_item("k", "{not json").unwrap();
        assert_eq!(load_from_storage::<Sample>(&store, "k"), None);
        assert!(store.contains("k"));
    }

    #[test]
    fn remove_clears_key() {
        let store = MemoryStorage::new();
        store.set_item("token", "abc").unwrap();
        store.remove_item("token");
        assert!(store.get_item("token").is_none());
        assert!(store.is_empty());
    }
}
