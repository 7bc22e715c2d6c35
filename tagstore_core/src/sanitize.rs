//! HTML escaping of opaque tag attributes

use crate::model::Attributes;
use serde_json::Value;

/// Escape every string inside `attributes`, descending into arrays and objects
pub fn escape_attributes(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .map(|(key, value)| (key.clone(), escape_value(value)))
        .collect()
}

fn escape_value(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(html_escape::encode_safe(text).into_owned()),
        Value::Array(items) => Value::Array(items.iter().map(escape_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), escape_value(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}
