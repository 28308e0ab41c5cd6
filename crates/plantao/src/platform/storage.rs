//! Storage abstraction for platform-independent persistence.
//!
//! This module defines the [`Storage`] trait: a flat key-value store holding
//! one JSON value per key, the same shape as browser LocalStorage. Typed
//! documents are layered on top in [`crate::documents`].

use serde_json::Value;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// I/O error (file not found, permission denied, etc.)
    Io(String),
    /// Parse error (stored text is not JSON)
    Parse(String),
    /// Serialization error
    Serialize(String),
    /// Storage not available (e.g., LocalStorage full or disabled)
    NotAvailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::NotAvailable(msg) => write!(f, "Storage not available: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Platform-independent key-value interface.
///
/// Writes are visible to the next read on the same store. Implementations
/// take `&self`; backends that need mutation use interior mutability.
pub trait Storage {
    /// Read the value under `key`.
    ///
    /// Returns `Ok(None)` for a missing key and [`StorageError::Parse`] when
    /// the stored text is not valid JSON.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// List every stored key
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Delete every key starting with `prefix`, returning how many were removed
    fn clear_prefix(&self, prefix: &str) -> Result<usize, StorageError> {
        let doomed: Vec<String> = self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect();
        for key in &doomed {
            self.remove(key)?;
        }
        Ok(doomed.len())
    }
}
