//! Serde helpers for loosely-typed backend fields.
//!
//! Ids arrive as JSON numbers on some endpoints and strings on others; both are
//! normalised to `String`. Single-record responses are sometimes wrapped in a
//! `data` object.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_id(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    value_to_id(Value::deserialize(d)?).ok_or_else(|| D::Error::custom("expected a string or numeric id"))
}

pub(crate) fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(value_to_id))
}

/// Decode `T` directly, or from a `data` wrapper when the direct decode fails.
pub(crate) fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(t) => Ok(t),
        Err(err) => match value {
            Value::Object(mut map) => match map.remove("data") {
                Some(inner) => serde_json::from_value(inner),
                None => Err(err),
            },
            _ => Err(err),
        },
    }
}
