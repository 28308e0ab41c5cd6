//! Native storage implementation using the filesystem.
//!
//! Directory structure:
//! ~/.plantao/
//!   config.yaml                      # Application configuration
//!   plantao.log                      # Rotated log file
//!   plantonmed_shifts.json           # One file per stored key
//!   plantonmed_shift_statuses.json
//!   ...

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::platform::storage::{Storage, StorageError};

const EXTENSION: &str = "json";

/// Key-value storage backed by a directory of JSON files.
pub struct NativeStorage {
    root: PathBuf,
}

impl NativeStorage {
    /// Create a new native storage with the given root path.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create native storage with the default path (~/.plantao/).
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Get the default data directory path (~/.plantao/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".plantao")
    }

    /// Get the root path of the storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", sanitize_filename(key), EXTENSION))
    }
}

impl Storage for NativeStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", key, e)))?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::Parse(format!("Failed to parse {}: {}", key, e)))
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.init()?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize {}: {}", key, e)))?;

        // Write to a sibling file first so a crash never leaves half a document
        let path = self.key_path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", key, e)))?;
        fs::rename(&staging, &path)
            .map_err(|e| StorageError::Io(format!("Failed to replace {}: {}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| StorageError::Io(format!("Failed to delete {}: {}", key, e)))?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to read data directory: {}", e)))?;

        let mut keys: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Sanitize a key to be safe for the filesystem
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
