//! Accessors for untyped JSON data.
//!
//! Every node and mark variant reads only the keys it declares; unknown keys
//! are ignored so documents produced by a newer editor still parse. A key
//! that is present but has the wrong JSON type is a [`AdfError::Malformed`]
//! error, never a silent drop. A declared-required key that is absent is a
//! [`AdfError::MissingField`] error.
//!
//! Optional fields map to `Option<T>`: `None` means the key was omitted from
//! the input, `Some` means it was present (including present-but-empty
//! values). Serialization omits `None` fields, which is what makes the
//! parse/serialize round trip reproduce the declared subset of the input.

use serde_json::{Map, Value};

use crate::error::AdfError;

/// An untyped JSON object, the raw form of every node, mark, and attrs record.
pub type DataMap = Map<String, Value>;

pub fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a DataMap, AdfError> {
    value
        .as_object()
        .ok_or_else(|| AdfError::Malformed(format!("{what} is not a JSON object")))
}

pub fn req_str(map: &DataMap, field: &'static str, owner: &'static str) -> Result<String, AdfError> {
    match map.get(field) {
        None => Err(AdfError::MissingField { owner, field }),
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AdfError::Malformed(format!("{owner}.{field} is not a string"))),
    }
}

pub fn opt_str(
    map: &DataMap,
    field: &'static str,
    owner: &'static str,
) -> Result<Option<String>, AdfError> {
    match map.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| AdfError::Malformed(format!("{owner}.{field} is not a string"))),
    }
}

pub fn req_i64(map: &DataMap, field: &'static str, owner: &'static str) -> Result<i64, AdfError> {
    match map.get(field) {
        None => Err(AdfError::MissingField { owner, field }),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| AdfError::Malformed(format!("{owner}.{field} is not an integer"))),
    }
}

pub fn opt_i64(
    map: &DataMap,
    field: &'static str,
    owner: &'static str,
) -> Result<Option<i64>, AdfError> {
    match map.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| AdfError::Malformed(format!("{owner}.{field} is not an integer"))),
    }
}

pub fn opt_f64(
    map: &DataMap,
    field: &'static str,
    owner: &'static str,
) -> Result<Option<f64>, AdfError> {
    match map.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| AdfError::Malformed(format!("{owner}.{field} is not a number"))),
    }
}

pub fn opt_bool(
    map: &DataMap,
    field: &'static str,
    owner: &'static str,
) -> Result<Option<bool>, AdfError> {
    match map.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| AdfError::Malformed(format!("{owner}.{field} is not a boolean"))),
    }
}

/// The `date` node carries its timestamp as a string of milliseconds, but
/// some producers emit a bare number. Both are accepted and normalized to
/// the string form the format documents.
pub fn req_stringy(
    map: &DataMap,
    field: &'static str,
    owner: &'static str,
) -> Result<String, AdfError> {
    match map.get(field) {
        None => Err(AdfError::MissingField { owner, field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(AdfError::Malformed(format!(
            "{owner}.{field} is not a string or number"
        ))),
    }
}
