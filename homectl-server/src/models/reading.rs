//! Readings extracted from a sensor payload

use serde_json::{Map, Value};

use super::EntityName;

/// One numeric key/value pair reported by a sensor
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub name: String,
    pub value: f64,
}

impl Reading {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Keep the numeric entries of a sensor payload.
///
/// Integers and floats are kept as-is, booleans become `1.0` / `0.0`.
/// Keys follow the name rules (trimmed, non-empty, at most 128 chars).
/// Every other entry is dropped with a warning.
pub fn readings_from_payload(payload: &Map<String, Value>) -> Vec<Reading> {
    let mut readings = Vec::with_capacity(payload.len());

    for (key, value) in payload {
        let name = match EntityName::new(key) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "invalid measurement name in sensor payload");
                continue;
            }
        };

        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };

        match number {
            Some(v) if v.is_finite() => readings.push(Reading::new(name.into_string(), v)),
            _ => tracing::warn!(key = %key, value = %value, "invalid data type in sensor payload"),
        }
    }

    readings
}
