//! Conversion between plain JSON and Firestore's typed value representation.
//!
//! Firestore wraps every value in a single-key object naming its type
//! (`{"stringValue": "x"}`, `{"mapValue": {"fields": {...}}}`, ...).

use serde_json::{json, Map, Number, Value};

pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) if items.is_empty() => json!({ "arrayValue": {} }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encodes every entry of a JSON object into a Firestore `fields` object.
pub fn encode_fields(map: &Map<String, Value>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), encode(value)))
            .collect(),
    )
}

/// Decodes one typed value. Unknown or malformed wrappers decode to `null`.
pub fn decode(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or_default()),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(|i| Value::Number(i.into()))
            .unwrap_or(Value::Null),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(Value::Null),
            "longitude": inner.get("longitude").cloned().unwrap_or(Value::Null),
        }),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => decode_fields(inner.get("fields").unwrap_or(&Value::Null)),
        _ => Value::Null,
    }
}

/// Decodes a Firestore `fields` object into a plain JSON object.
pub fn decode_fields(fields: &Value) -> Value {
    Value::Object(
        fields
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(key, value)| (key.clone(), decode(value)))
                    .collect()
            })
            .unwrap_or_default(),
    )
}
