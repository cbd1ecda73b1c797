//! Tolerant field lookup over schema-less documents.
//!
//! A logical field is described by its name variants in priority order. The
//! first variant that is present, non-null and coercible to the field's type
//! wins; when none qualifies the caller gets the type default.

use chrono::DateTime;
use serde_json::{Map, Value};

use super::{Document, MappingError};

/// Output format for every date field (`dd MMMM yyyy`, English month names).
pub const DATE_FORMAT: &str = "%d %B %Y";

/// Read-only view over a document body that is known to be an object.
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(document: &'a Document) -> Result<Self, MappingError> {
        match &document.body {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(MappingError::NotAnObject {
                document_id: document.id.clone(),
            }),
        }
    }

    /// First variant that is present, non-null and accepted by `coerce`.
    pub fn first<T>(&self, names: &[&str], coerce: impl Fn(&Value) -> Option<T>) -> Option<T> {
        names
            .iter()
            .filter_map(|name| self.map.get(*name))
            .filter(|value| !value.is_null())
            .find_map(coerce)
    }

    pub fn int(&self, names: &[&str]) -> i64 {
        self.int_or(names, 0)
    }

    pub fn int_or(&self, names: &[&str], default: i64) -> i64 {
        self.first(names, as_int).unwrap_or(default)
    }

    pub fn float(&self, names: &[&str]) -> f64 {
        self.first(names, as_float).unwrap_or_default()
    }

    pub fn text(&self, names: &[&str]) -> String {
        self.first(names, as_text).unwrap_or_default()
    }

    pub fn text_or(&self, names: &[&str], default: &str) -> String {
        self.first(names, as_text)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn date(&self, names: &[&str]) -> String {
        self.first(names, as_date).unwrap_or_default()
    }
}

/// Integer coercion: integers, finite floats (truncated) and numeric strings.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// String coercion: any scalar, stringified.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Date coercion: a structured timestamp is formatted, a string is kept as-is.
pub fn as_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let (seconds, nanos) = timestamp_parts(map)?;
            DateTime::from_timestamp(seconds, nanos).map(|dt| dt.format(DATE_FORMAT).to_string())
        }
        _ => None,
    }
}

/// Seconds/nanoseconds of a timestamp object, in either the client
/// (`seconds`) or export (`_seconds`) spelling.
fn timestamp_parts(map: &Map<String, Value>) -> Option<(i64, u32)> {
    let seconds = ["seconds", "_seconds"]
        .iter()
        .find_map(|key| map.get(*key).and_then(as_int))?;
    let nanos = ["nanoseconds", "_nanoseconds", "nanos"]
        .iter()
        .find_map(|key| map.get(*key).and_then(as_int))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);
    Some((seconds, nanos))
}

/// Boolean-ish flag stored as 0/1, a bool, or a numeric string.
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        other => as_int(other).map(|n| n != 0),
    }
}
