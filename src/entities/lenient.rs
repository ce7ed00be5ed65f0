//! Tolerant field decoding for documents written outside this crate
//!
//! Orders and analysis documents come from users and external tools. A
//! wrongly typed field degrades to "absent" (or the type's default) instead
//! of failing the whole document, so the defect can still be reported.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Read a scalar as text; numbers and booleans are rendered, anything else
/// is absent
pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!("ignoring non-scalar text field: {}", other);
            None
        }
    })
}

/// Like [`opt_string`], with an empty string for absent values
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Like [`opt_string`], with "Unknown" for absent values
pub fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_string(deserializer)?.unwrap_or_else(unknown))
}

pub fn unknown() -> String {
    "Unknown".to_string()
}

/// Read a number, accepting numeric strings such as `"5"`
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!("ignoring non-numeric value {:?}", s);
                None
            }
        },
        other => {
            warn!("ignoring non-numeric value {}", other);
            None
        }
    })
}

/// Read any value, falling back to the type's default when it does not fit
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        warn!("using default for unexpected value {}: {}", value, e);
        T::default()
    }))
}

/// Read a list, keeping the entries that decode and skipping the rest
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("expected a list, ignoring {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(index, "skipping malformed list entry: {}", e);
                None
            }
        })
        .collect())
}
