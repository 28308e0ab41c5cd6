//! Work and payment status overlays
//!
//! Both maps are sparse: only non-default statuses are stored, and setting
//! an occurrence back to its default deletes the key. Documents written by
//! older clients may still contain explicit `"pending"` entries; those are
//! dropped on load.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::OccurrenceId;
use super::lenient;

/// Whether a shift occurrence was worked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    #[default]
    Pending,
    Completed,
    Missed,
}

/// Whether a shift occurrence's pay has been credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Received,
}

/// Sparse occurrence → status map; absent keys read as the default status
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMap<S> {
    entries: BTreeMap<OccurrenceId, S>,
}

impl<S> Default for StatusMap<S> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<S: Copy + Default + PartialEq> StatusMap<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &OccurrenceId) -> S {
        self.entries.get(id).copied().unwrap_or_default()
    }

    /// Set a status, returning the previous one. The default status removes
    /// the key.
    pub fn set(&mut self, id: OccurrenceId, status: S) -> S {
        let previous = if status == S::default() {
            self.entries.remove(&id)
        } else {
            self.entries.insert(id, status)
        };
        previous.unwrap_or_default()
    }

    /// Delete the entry. Returns whether one was stored.
    pub fn reset(&mut self, id: &OccurrenceId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn contains(&self, id: &OccurrenceId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OccurrenceId, S)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

impl<S: Serialize> Serialize for StatusMap<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, status) in &self.entries {
            map.serialize_entry(id.as_str(), status)?;
        }
        map.end()
    }
}

impl<'de, S> Deserialize<'de> for StatusMap<S>
where
    S: DeserializeOwned + Copy + Default + PartialEq,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        let mut map = StatusMap::default();
        if let Some(serde_json::Value::Object(raw)) = value {
            for (key, status) in raw {
                let Some(status) = status.as_str().and_then(lenient::parse_choice::<S>) else {
                    continue;
                };
                map.set(OccurrenceId::from_raw(key), status);
            }
        }
        Ok(map)
    }
}

/// Both status overlays together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBook {
    pub work: StatusMap<WorkStatus>,
    pub payment: StatusMap<PaymentStatus>,
}

impl StatusBook {
    pub fn mark_completed(&mut self, id: OccurrenceId) {
        self.work.set(id, WorkStatus::Completed);
    }

    pub fn mark_missed(&mut self, id: OccurrenceId) {
        self.work.set(id, WorkStatus::Missed);
    }

    pub fn reset_work(&mut self, id: &OccurrenceId) {
        self.work.reset(id);
    }

    pub fn mark_received(&mut self, id: OccurrenceId) {
        self.payment.set(id, PaymentStatus::Received);
    }

    pub fn mark_payment_pending(&mut self, id: &OccurrenceId) {
        self.payment.reset(id);
    }

    /// Apply a user action to the matching map.
    pub fn apply(&mut self, id: OccurrenceId, action: StatusAction) {
        match action {
            StatusAction::Completed => self.mark_completed(id),
            StatusAction::Missed => self.mark_missed(id),
            StatusAction::ResetWork => self.reset_work(&id),
            StatusAction::Received => self.mark_received(id),
            StatusAction::PaymentPending => self.mark_payment_pending(&id),
        }
    }
}

/// A status change requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Completed,
    Missed,
    ResetWork,
    Received,
    PaymentPending,
}

impl StatusAction {
    /// Whether the action touches the payment map rather than the work map.
    pub fn is_payment(self) -> bool {
        matches!(self, StatusAction::Received | StatusAction::PaymentPending)
    }
}

impl FromStr for StatusAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "completed" => Ok(StatusAction::Completed),
            "missed" => Ok(StatusAction::Missed),
            "reset" => Ok(StatusAction::ResetWork),
            "received" => Ok(StatusAction::Received),
            "pending" => Ok(StatusAction::PaymentPending),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status action {:?} (expected completed, missed, reset, received or pending)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAction {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(raw: &str) -> OccurrenceId {
        OccurrenceId::from_raw(raw)
    }

    #[test]
    fn test_absent_key_is_pending() {
        let map: StatusMap<PaymentStatus> = StatusMap::new();
        assert_eq!(map.get(&id("x-2024-01-01")), PaymentStatus::Pending);
        assert_eq!(serde_json::to_value(&map).unwrap(), json!({}));
    }

    #[test]
    fn test_setting_default_removes_key() {
        let mut map = StatusMap::new();
        map.set(id("a"), WorkStatus::Completed);
        assert!(map.contains(&id("a")));
        let previous = map.set(id("a"), WorkStatus::Pending);
        assert_eq!(previous, WorkStatus::Completed);
        assert!(!map.contains(&id("a")));
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_drops_pending_and_unknown_values() {
        let map: StatusMap<WorkStatus> = serde_json::from_value(json!({
            "a-2024-03-01": "completed",
            "b-2024-03-01": "pending",
            "sporadic-9": "missed",
            "c-2024-03-02": "on-hold",
            "d-2024-03-03": 3
        }))
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&id("sporadic-9")), WorkStatus::Missed);
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"a-2024-03-01": "completed", "sporadic-9": "missed"})
        );
    }

    #[test]
    fn test_status_book_actions() {
        let mut book = StatusBook::default();
        book.apply(id("a"), StatusAction::Received);
        book.apply(id("a"), StatusAction::Completed);
        assert_eq!(book.payment.get(&id("a")), PaymentStatus::Received);
        assert_eq!(book.work.get(&id("a")), WorkStatus::Completed);

        book.apply(id("a"), StatusAction::PaymentPending);
        book.apply(id("a"), StatusAction::ResetWork);
        assert!(book.payment.is_empty());
        assert!(book.work.is_empty());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("received".parse(), Ok(StatusAction::Received));
        assert_eq!("reset".parse(), Ok(StatusAction::ResetWork));
        assert!("done".parse::<StatusAction>().is_err());
    }
}
