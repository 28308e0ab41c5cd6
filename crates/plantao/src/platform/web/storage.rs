//! Web storage implementation using browser LocalStorage.

use gloo_storage::errors::StorageError as GlooError;
use gloo_storage::{LocalStorage, Storage as GlooStorage};
use serde_json::Value;

use crate::platform::storage::{Storage, StorageError};

/// Web storage implementation using browser LocalStorage.
///
/// Every key holds one JSON document, exactly as the browser app wrote it.
pub struct WebStorage;

impl WebStorage {
    /// Create a new web storage instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match LocalStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(GlooError::KeyNotFound(_)) => Ok(None),
            Err(GlooError::SerdeError(e)) => Err(StorageError::Parse(format!(
                "Failed to parse {}: {}",
                key, e
            ))),
            Err(e) => Err(StorageError::NotAvailable(format!(
                "Failed to read {}: {}",
                key, e
            ))),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        LocalStorage::set(key, value)
            .map_err(|e| StorageError::Io(format!("Failed to save {}: {}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::delete(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let raw = LocalStorage::raw();
        let length = LocalStorage::length();
        let mut keys = Vec::with_capacity(length as usize);
        for index in 0..length {
            match raw.key(index) {
                Ok(Some(key)) => keys.push(key),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(index, error = ?e, "Failed to list LocalStorage key");
                }
            }
        }
        Ok(keys)
    }
}
