//! Pure conversions between tool inputs, upstream requests and stable
//! outputs.
//!
//! Output conversions drop unknown upstream fields and leave absent optional
//! fields absent; only fields declared nullable are filled with `null`.

pub mod agent;
pub mod call;
pub mod knowledge_base;
pub mod llm;
pub mod phone_number;
pub mod test_case;
pub mod voice;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AdapterError, Result};

/// Declared fields of a projected output.
pub(crate) struct OutputShape {
    /// Must be present upstream.
    pub required: &'static [&'static str],
    /// Copied when present (including explicit nulls).
    pub optional: &'static [&'static str],
    /// Copied when present, `null` otherwise.
    pub nullable: &'static [&'static str],
}

/// Keep only the fields declared by `shape`, in declaration order.
pub(crate) fn project(operation: &str, value: &Value, shape: &OutputShape) -> Result<Value> {
    let source = value
        .as_object()
        .ok_or_else(|| unexpected(operation, "expected a JSON object"))?;

    let mut out = Map::new();
    for &key in shape.required {
        let field = source
            .get(key)
            .ok_or_else(|| unexpected(operation, &format!("missing field `{key}`")))?;
        out.insert(key.to_string(), field.clone());
    }
    for &key in shape.optional {
        if let Some(field) = source.get(key) {
            out.insert(key.to_string(), field.clone());
        }
    }
    for &key in shape.nullable {
        out.insert(
            key.to_string(),
            source.get(key).cloned().unwrap_or(Value::Null),
        );
    }
    Ok(Value::Object(out))
}

/// Deserialize an upstream body into a typed output.
pub(crate) fn decode<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| unexpected(operation, &e.to_string()))
}

/// Deserialize an upstream array into typed outputs.  A non-array body
/// yields an empty list.
pub(crate) fn decode_list<T: DeserializeOwned>(operation: &str, value: Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| decode(operation, item))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Apply [`project`] to every element of an upstream array.
pub(crate) fn project_list(operation: &str, value: &Value, shape: &OutputShape) -> Result<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| project(operation, item, shape))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        _ => Ok(Value::Array(Vec::new())),
    }
}

/// Turn an empty get-by-id body into [`AdapterError::NotFound`].
pub(crate) fn require_found(value: Value, resource: &'static str, id: &str) -> Result<Value> {
    let empty = match &value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        Err(AdapterError::NotFound {
            resource,
            id: id.to_string(),
        })
    } else {
        Ok(value)
    }
}

pub(crate) fn to_value<T: serde::Serialize>(output: &T) -> Result<Value> {
    Ok(serde_json::to_value(output)?)
}

fn unexpected(operation: &str, reason: &str) -> AdapterError {
    AdapterError::UnexpectedResponse {
        operation: operation.to_string(),
        reason: reason.to_string(),
    }
}
