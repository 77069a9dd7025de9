//! Conversion from `serde_json::Value`.
//!
//! JSON arrays become sequences and JSON objects become text-keyed maps, so a
//! decoded payload can be fed straight into extraction.

use serde_json::Value as JsonValue;

use crate::{Collection, Map, Value};

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Boolean(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            JsonValue::String(s) => Self::from(s),
            JsonValue::Array(items) => {
                Self::Collection(Collection::sequence(items.into_iter().map(Self::from)))
            }
            JsonValue::Object(fields) => Self::Map(Map::from_entries(
                fields.into_iter().map(|(k, v)| (Self::from(k), Self::from(v))),
            )),
        }
    }
}
