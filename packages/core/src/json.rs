//! Conversions between records and JSON.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Error, Record, Result, Value, WriteRecord};

/// Serializes as a map from column name to raw string, in header order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Record {
    /// The record as a JSON object of strings, keys in header order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
        )
    }
}

impl WriteRecord {
    /// Build a record from a JSON object.
    ///
    /// Strings, booleans and numbers map to the matching `Value`; nested
    /// arrays and objects are kept as their JSON text; `null` fields are
    /// left unset so that writer defaults apply.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(object) = json else {
            return Err(Error::Json {
                message: format!("expected an object, found {}", json_kind(&json)),
            });
        };

        let mut record = WriteRecord::new();
        for (name, value) in object {
            if let Some(value) = json_to_value(value) {
                record.set(name, value);
            }
        }
        Ok(record)
    }
}

/// Convert a JSON scalar to a `Value`; `null` has no counterpart.
pub fn json_to_value(json: serde_json::Value) -> Option<Value> {
    match json {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Bool(b)),
        serde_json::Value::Number(n) => Some(if let Some(i) = n.as_i64() {
            Value::Int(i)
        } else if let Some(f) = n.as_f64() {
            Value::Float(f)
        } else {
            // Fallback for numbers outside i64 and f64
            Value::String(n.to_string())
        }),
        serde_json::Value::String(s) => Some(Value::String(s)),
        nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            Some(Value::String(nested.to_string()))
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
