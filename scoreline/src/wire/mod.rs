//! Partial views of upstream payloads.
//!
//! Every field is optional or defaulted: the upstream schemas are only
//! loosely documented and fields come and go. Decoding fails only when the
//! payload is not a JSON object at all or a present field has the wrong type.

pub mod espn;
pub mod sofascore;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use shared::{Error, Result};

/// Treats an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(raw: Value) -> Result<T> {
    if !raw.is_object() {
        return Err(Error::Decode(format!(
            "expected a JSON object, got {}",
            kind_of(&raw)
        )));
    }
    serde_json::from_value(raw).map_err(|e| Error::Decode(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
