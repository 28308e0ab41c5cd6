//! Typed documents over the key-value store.
//!
//! Six documents live under a shared key prefix (`plantonmed` by default):
//!
//! | key                          | document                      |
//! |------------------------------|-------------------------------|
//! | `{prefix}_shifts`            | [`ShiftsDocument`]            |
//! | `{prefix}_sporadic_shifts`   | list of [`SporadicShift`]     |
//! | `{prefix}_sporadic_estimate` | [`SporadicEstimate`]          |
//! | `{prefix}_shift_statuses`    | work-status map               |
//! | `{prefix}_payment_statuses`  | payment-status map            |
//! | `{prefix}_profile`           | [`Profile`]                   |
//!
//! Reads are fail-soft: a missing document is its default, and a document
//! that cannot be read is logged and treated as missing. Writes replace the
//! whole document.

use plantao_core::PlannerInputs;
use plantao_core::model::{
    PaymentStatus, Profile, ShiftsDocument, SporadicEstimate, SporadicShift, StatusBook,
    StatusMap, WorkStatus, sporadic_list_from_value,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::platform::{Storage, StorageError};

/// Storage keys for one user namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKeys {
    prefix: String,
}

impl DocumentKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    pub fn shifts(&self) -> String {
        self.key("shifts")
    }

    pub fn sporadic_shifts(&self) -> String {
        self.key("sporadic_shifts")
    }

    pub fn sporadic_estimate(&self) -> String {
        self.key("sporadic_estimate")
    }

    pub fn work_statuses(&self) -> String {
        self.key("shift_statuses")
    }

    pub fn payment_statuses(&self) -> String {
        self.key("payment_statuses")
    }

    pub fn profile(&self) -> String {
        self.key("profile")
    }
}

impl Default for DocumentKeys {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_KEY_PREFIX)
    }
}

/// Typed access to the stored documents
pub struct Documents<S: Storage> {
    storage: S,
    keys: DocumentKeys,
}

impl<S: Storage> Documents<S> {
    pub fn new(storage: S, keys: DocumentKeys) -> Self {
        Self { storage, keys }
    }

    pub fn keys(&self) -> &DocumentKeys {
        &self.keys
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Raw value under `key`. Unparseable text is logged and read as absent;
    /// any other storage failure is returned.
    fn read_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self.storage.get(key) {
            Ok(value) => Ok(value.filter(|v| !v.is_null())),
            Err(StorageError::Parse(msg)) => {
                tracing::warn!(key, error = %msg, "Ignoring unreadable document");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(value) = self.read_value(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed document");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, doc: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(doc)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize {}: {}", key, e)))?;
        self.storage.set(key, &value)?;
        tracing::debug!(key, "Document saved");
        Ok(())
    }

    pub fn shifts(&self) -> Result<ShiftsDocument, StorageError> {
        Ok(self.read(&self.keys.shifts())?.unwrap_or_default())
    }

    pub fn save_shifts(&self, doc: &ShiftsDocument) -> Result<(), StorageError> {
        self.write(&self.keys.shifts(), doc)
    }

    pub fn sporadic_shifts(&self) -> Result<Vec<SporadicShift>, StorageError> {
        let key = self.keys.sporadic_shifts();
        let Some(value) = self.read_value(&key)? else {
            return Ok(Vec::new());
        };
        if !value.is_array() {
            tracing::warn!(key, "Sporadic shift list is not an array; reading as empty");
        }
        Ok(sporadic_list_from_value(value))
    }

    pub fn save_sporadic_shifts(&self, shifts: &[SporadicShift]) -> Result<(), StorageError> {
        self.write(&self.keys.sporadic_shifts(), &shifts)
    }

    pub fn sporadic_estimate(&self) -> Result<Option<SporadicEstimate>, StorageError> {
        self.read(&self.keys.sporadic_estimate())
    }

    pub fn save_sporadic_estimate(&self, estimate: &SporadicEstimate) -> Result<(), StorageError> {
        self.write(&self.keys.sporadic_estimate(), estimate)
    }

    pub fn clear_sporadic_estimate(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.keys.sporadic_estimate())
    }

    pub fn work_statuses(&self) -> Result<StatusMap<WorkStatus>, StorageError> {
        Ok(self.read(&self.keys.work_statuses())?.unwrap_or_default())
    }

    pub fn save_work_statuses(&self, map: &StatusMap<WorkStatus>) -> Result<(), StorageError> {
        self.write(&self.keys.work_statuses(), map)
    }

    pub fn payment_statuses(&self) -> Result<StatusMap<PaymentStatus>, StorageError> {
        Ok(self.read(&self.keys.payment_statuses())?.unwrap_or_default())
    }

    pub fn save_payment_statuses(
        &self,
        map: &StatusMap<PaymentStatus>,
    ) -> Result<(), StorageError> {
        self.write(&self.keys.payment_statuses(), map)
    }

    pub fn statuses(&self) -> Result<StatusBook, StorageError> {
        Ok(StatusBook {
            work: self.work_statuses()?,
            payment: self.payment_statuses()?,
        })
    }

    pub fn profile(&self) -> Result<Profile, StorageError> {
        Ok(self.read(&self.keys.profile())?.unwrap_or_default())
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        self.write(&self.keys.profile(), profile)
    }

    /// Everything the engine needs, read fresh from the store
    pub fn inputs(&self) -> Result<PlannerInputs, StorageError> {
        Ok(PlannerInputs {
            shifts: self.shifts()?,
            sporadic: self.sporadic_shifts()?,
            estimate: self.sporadic_estimate()?,
            statuses: self.statuses()?,
        })
    }

    /// Delete every document in this namespace
    pub fn clear_all(&self) -> Result<usize, StorageError> {
        let removed = self.storage.clear_prefix(&format!("{}_", self.keys.prefix))?;
        tracing::info!(prefix = self.keys.prefix(), removed, "Cleared stored documents");
        Ok(removed)
    }
}
