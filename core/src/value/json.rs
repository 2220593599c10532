//! JSON bridge for values
//!
//! Used when saved state leaves memory. Identity does not survive the trip:
//! arrays and objects come back as fresh handles.

use serde_json::{Map, Number};

use super::{List, Record, Value};

impl Value {
    /// Convert to JSON. Functions, `Undefined` and non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Function(_) => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Number(v) => Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(list) => {
                serde_json::Value::Array(list.to_vec().iter().map(Value::to_json).collect())
            }
            Value::Object(record) => {
                let mut map = Map::new();
                for (key, value) in record.entries() {
                    map.insert(key, value.to_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }

    /// Convert from JSON. `null` becomes `Undefined`.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Undefined,
            serde_json::Value::Bool(v) => Value::Bool(*v),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(List::new(items.iter().map(Value::from_json).collect()))
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect::<Record>(),
            ),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from_json(&json))
    }
}
