//! Lenient readers over `serde_json::Value`.
//!
//! Every reader returns `None` (or an empty collection) when the field is
//! missing or holds the wrong JSON type.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub(crate) fn string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64).filter(|n| n.is_finite())
}

/// Non-negative integer; floats are truncated
pub(crate) fn count(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    number(obj, key).filter(|n| *n >= 0.0).map(|n| n as u64)
}

/// `count` narrowed to `u32`, saturating at `u32::MAX`
pub(crate) fn small_count(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    count(obj, key).map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Numbers or numeric strings, rendered without a fractional part
pub(crate) fn scalar_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_f64().map(|f| (f as i64).to_string())),
        _ => None,
    }
}

/// Booleans, or numbers where nonzero means set
pub(crate) fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

/// True when the key holds any non-null value
pub(crate) fn present(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).is_some_and(|v| !v.is_null())
}

/// Name → level mapping; entries with non-numeric levels are dropped
pub(crate) fn level_map(obj: &Map<String, Value>, key: &str) -> BTreeMap<String, u32> {
    let Some(Value::Object(map)) = obj.get(key) else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(name, level)| {
            let level = match level {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }?;
            (level.is_finite() && level >= 0.0)
                .then(|| (name.to_ascii_lowercase(), level as u32))
        })
        .collect()
}

pub(crate) fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn object<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}
