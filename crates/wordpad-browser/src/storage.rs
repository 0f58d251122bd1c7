//! localStorage-backed key-value store.

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use wordpad_core::{EditorError, KeyValueStore};

/// Values are stored as JSON strings through `gloo-storage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    pub fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, EditorError> {
        match LocalStorage::get::<String>(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(EditorError::Storage(err.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EditorError> {
        LocalStorage::set(key, value).map_err(|err| EditorError::Storage(err.to_string()))
    }
}
