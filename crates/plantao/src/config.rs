//! Application configuration.
//!
//! Read from `{data_dir}/config.yaml`. Every field is optional:
//!
//! ```yaml
//! key_prefix: plantonmed
//! log_level: info
//! week_starts_on: sunday
//! ```

use std::path::{Path, PathBuf};

use plantao_core::WeekStart;
use serde::{Deserialize, Serialize};

use crate::platform::StorageError;

/// Namespace shared with the browser app's stored documents
pub const DEFAULT_KEY_PREFIX: &str = "plantonmed";

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix of every storage key
    pub key_prefix: String,
    /// Default log level; `--log-level` and `RUST_LOG` take precedence
    pub log_level: String,
    pub week_starts_on: WeekStart,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            log_level: "info".to_string(),
            week_starts_on: WeekStart::Monday,
        }
    }
}

impl AppConfig {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, StorageError> {
        let mut config: AppConfig = serde_saphyr::from_str(yaml)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))?;
        if config.key_prefix.trim().is_empty() {
            config.key_prefix = DEFAULT_KEY_PREFIX.to_string();
        }
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, StorageError> {
        serde_saphyr::to_string(self)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))
    }

    /// Load the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_or_default(data_dir: &Path) -> Self {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_yaml(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), StorageError> {
        let yaml = self.to_yaml()?;
        std::fs::create_dir_all(data_dir)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;
        std::fs::write(Self::path(data_dir), yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {}", e)))
    }
}
