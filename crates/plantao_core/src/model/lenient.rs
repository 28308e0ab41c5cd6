//! Fail-soft field readers for persisted documents.
//!
//! Documents are written by form wizards, so a field may hold a string, a
//! number, an empty string, a value from an older version of a picklist, or
//! nothing at all. These helpers turn anything unusable into `None` instead
//! of rejecting the whole document.

use jiff::civil::Date;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a form field as text. Numbers and booleans are stringified; null,
/// empty strings, arrays and objects become `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

/// Read a picklist value. Unknown values become `None`.
pub fn choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(text(deserializer)?.and_then(|raw| parse_choice(&raw)))
}

/// Read a form field as text, empty when unusable.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Read a nested parameter bundle. A bundle of the wrong shape is dropped.
pub fn bundle<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Read a list field as raw elements. Anything but an array is empty.
pub fn elements<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Read an ISO `yyyy-MM-dd` date. Invalid dates become `None`.
pub fn date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.and_then(|raw| raw.trim().parse::<Date>().ok()))
}

/// Parse a unit-variant enum from its wire name.
pub fn parse_choice<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let de: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
        raw.trim().into_deserializer();
    T::deserialize(de).ok()
}

fn value_to_text(value: Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
