//! Decoding of Firestore REST documents (typed `Value` wrappers) into plain JSON.
//!
//! A REST document looks like
//! `{ "name": "...", "fields": { "averageWpm": { "doubleValue": 61.2 } } }`;
//! the dashboard wants `{ "averageWpm": 61.2 }`.

use serde_json::{Map, Number, Value};

/// Flatten the `fields` of a REST document. Missing `fields` decodes to an
/// empty map (Firestore omits it for empty documents).
pub fn decode_document(document: &Value) -> Map<String, Value> {
    document
        .get("fields")
        .and_then(Value::as_object)
        .map(decode_fields)
        .unwrap_or_default()
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Decode one typed value. Unknown wrappers decode to `null`.
pub fn decode_value(value: &Value) -> Value {
    let Some(wrapper) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = wrapper.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.as_bool().map(Value::Bool).unwrap_or(Value::Null),
        "integerValue" => decode_integer(inner),
        "doubleValue" => decode_double(inner),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "geoPointValue" => inner.clone(),
        other => {
            tracing::debug!(kind = other, "unknown firestore value kind");
            Value::Null
        }
    }
}

// Integers travel as decimal strings to survive JS number precision.
fn decode_integer(inner: &Value) -> Value {
    match inner {
        Value::String(raw) => raw
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .unwrap_or(Value::Null),
        Value::Number(n) => Value::Number(n.clone()),
        _ => Value::Null,
    }
}

// NaN and the infinities arrive as strings and have no JSON representation.
fn decode_double(inner: &Value) -> Value {
    match inner {
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(raw) => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
