// Forgiving deserializers for hand-edited or stale snapshots.
// Anything of the wrong JSON type degrades to a default instead of failing
// the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::version::FORMAT_VERSION;

/// Array of strings; numbers and booleans are stringified, everything else
/// becomes an empty string. A non-array yields an empty list.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().map(string_of).collect(),
        _ => Vec::new(),
    })
}

fn string_of(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Array of arrays of integers. Non-integer entries read as `0`; a row that
/// is not an array reads as an empty row.
pub fn int_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(rows) = value else {
        return Ok(Vec::new());
    };

    Ok(rows
        .into_iter()
        .map(|row| match row {
            Value::Array(cells) => cells.iter().map(int_of).collect(),
            _ => Vec::new(),
        })
        .collect())
}

fn int_of(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0)
}

/// Version tag; anything but a string reads as the current format.
pub fn version_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(tag) => tag,
        other => {
            log::warn!("format version {} is not a string; assuming current", other);
            FORMAT_VERSION.to_string()
        }
    })
}

/// Optional list of encoded rows. `null` means absent; a non-string row
/// reads as `""`, which decodes to a background row. Anything other than an
/// array reads as an empty list.
pub fn encoded_rows<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(row) => row,
                    _ => String::new(),
                })
                .collect(),
        ),
        other => {
            log::warn!("whiteboard is not a list of rows ({}); reading it as empty", other);
            Some(Vec::new())
        }
    })
}

/// Optional nested document; one that does not fit `T` reads as absent.
pub fn optional_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .map_err(|e| log::warn!("ignoring unreadable section: {}", e))
        .ok())
}
