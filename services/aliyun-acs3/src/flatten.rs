//! Flatten structured query parameters into the wire form of Alibaba Cloud RPC APIs.
//!
//! - `{"a": {"b": 1}}` becomes `a.b=1`
//! - `{"ids": [1, 2, 3]}` becomes `ids=[1,2,3]`
//! - `{"Tag": [{"Key": "a"}]}` becomes `Tag.1.Key=a`

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flatten nested query parameters into a sorted map of dotted keys.
///
/// `null` values are dropped and empty objects contribute nothing.
pub fn flatten_query(query: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (key, value) in query {
        flatten_into(key.clone(), value, &mut out);
    }
    out
}

fn flatten_into(key: String, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            out.insert(key, s.clone());
        }
        // Numbers use their JSON text, so `1.0` stays `1.0`.
        Value::Bool(_) | Value::Number(_) => {
            out.insert(key, value.to_string());
        }
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(format!("{key}.{k}"), v, out);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            for (idx, v) in items.iter().enumerate() {
                flatten_into(format!("{key}.{}", idx + 1), v, out);
            }
        }
        // Scalar lists travel as one JSON encoded value.
        Value::Array(_) => {
            out.insert(key, value.to_string());
        }
    }
}
