//! Forgiving decoders for saved data.
//!
//! A field of the wrong shape falls back to its default instead of failing the whole
//! record, and a list drops the entries it cannot read. Ids that are not UUIDs (older
//! saves used short strings) are mapped to a stable UUID so every reference to the
//! same raw id still matches after loading.

use crate::models::player::DEFAULT_SKILL_RATING;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

fn recover<'de, D, T>(deserializer: D, fallback: impl FnOnce() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed field: {}", e);
        fallback()
    }))
}

/// Any field with a `Default`.
pub(crate) fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    recover(deserializer, T::default)
}

/// Flags that default to on (`active`, `fairRoll`).
pub(crate) fn flag_on<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    recover(deserializer, || true)
}

pub(crate) fn skill_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    recover(deserializer, || DEFAULT_SKILL_RATING)
}

pub(crate) fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    recover(deserializer, Utc::now)
}

/// UUID for a saved id: parsed as-is when it is one, otherwise derived from the raw text.
pub fn stable_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()))
}

pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => stable_id(&raw),
        Value::Number(n) => stable_id(&n.to_string()),
        other => {
            log::warn!("Replacing unreadable id {}", other);
            Uuid::new_v4()
        }
    })
}

/// Lists of records: unreadable entries are dropped, a non-list reads as empty.
pub(crate) fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            log::warn!("Expected a list, found {}; using an empty one", other);
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Dropping unreadable record: {}", e);
                None
            }
        })
        .collect())
}
