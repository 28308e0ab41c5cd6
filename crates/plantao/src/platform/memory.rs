//! In-memory storage backend.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::Value;

use super::storage::{Storage, StorageError};

/// Storage held in a map for the lifetime of the process.
///
/// Values are kept as serialized text so that a test can plant a document
/// that is not valid JSON with [`MemoryStorage::set_raw`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `key` without checking it
    pub fn set_raw(&self, key: &str, text: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self.entries.borrow().get(key) {
            None => Ok(None),
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| StorageError::Parse(format!("Failed to parse {}: {}", key, e))),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize {}: {}", key, e)))?;
        self.entries.borrow_mut().insert(key.to_string(), text);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}
