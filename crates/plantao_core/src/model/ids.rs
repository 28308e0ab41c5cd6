//! Identifiers for shift definitions and their dated occurrences
//!
//! Stored documents carry ids as plain strings, so each newtype is
//! `#[serde(transparent)]`. Occurrence ids are synthetic: they are derived
//! from a definition id and a date and are the keys of the status maps.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Identifier of a recurring ("fixed") shift definition
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(pub String);

/// Identifier of a one-off ("sporadic") shift
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SporadicId(pub String);

/// Key of one dated occurrence in the status maps.
///
/// Fixed occurrences are `"{definitionId}-{yyyy-MM-dd}"`, sporadic ones are
/// `"sporadic-{occurrenceId}"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(String);

impl ShiftId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        ShiftId(uuid::Uuid::new_v4().to_string())
    }
}

impl SporadicId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        SporadicId(uuid::Uuid::new_v4().to_string())
    }
}

impl OccurrenceId {
    pub fn fixed(definition: &ShiftId, date: Date) -> Self {
        OccurrenceId(format!("{}-{}", definition.0, date))
    }

    pub fn sporadic(id: &SporadicId) -> Self {
        OccurrenceId(format!("sporadic-{}", id.0))
    }

    /// Wrap an id received from the presentation layer or the CLI.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        OccurrenceId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_sporadic(&self) -> bool {
        self.0.starts_with("sporadic-")
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SporadicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
