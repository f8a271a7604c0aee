//! Tool input schemas, upstream request payloads and stable output shapes.
//!
//! Input types derive [`JsonSchema`] (advertised to MCP hosts) and
//! [`Validate`] (checked before any upstream call).  Request types mirror the
//! upstream snake_case wire format and omit absent optional fields.

pub mod agent;
pub mod call;
pub mod knowledge_base;
pub mod llm;
pub mod phone_number;
pub mod test_case;
pub mod voice;

use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::{Validate, ValidationError};

use crate::error::{AdapterError, Result};
use crate::traits::ToolDefinition;

/// Input for tools that take no parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, Validate)]
pub struct NoParams {}

/// Deserialize and validate tool parameters.
///
/// A `null` parameter object is treated as `{}`.  Any failure is reported as
/// [`AdapterError::InvalidParams`] naming the offending field.
pub fn parse_params<T>(tool_name: &str, params: Value) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let params = if params.is_null() { json!({}) } else { params };
    let input: T = serde_json::from_value(params).map_err(|e| AdapterError::InvalidParams {
        tool_name: tool_name.to_string(),
        reason: e.to_string(),
    })?;
    input.validate().map_err(|e| AdapterError::InvalidParams {
        tool_name: tool_name.to_string(),
        reason: e.to_string().trim_end().to_string(),
    })?;
    Ok(input)
}

/// Build a [`ToolDefinition`] whose parameter schema is generated from `T`.
pub fn tool_definition<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();
    let mut parameters =
        serde_json::to_value(&schema).unwrap_or_else(|_| json!({ "type": "object" }));
    if let Some(obj) = parameters.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        obj.remove("definitions");
    }
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    }
}

/// The uniform body returned by every delete tool.
pub fn deleted(resource: &str, id: &str) -> Value {
    json!({
        "success": true,
        "message": format!("{resource} {id} deleted successfully"),
    })
}

// ---------------------------------------------------------------------------
// Shared validators
// ---------------------------------------------------------------------------

/// Accept `+` followed by 7 to 15 digits.
pub(crate) fn validate_phone_number(value: &str) -> std::result::Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or("");
    if (7..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_number");
        err.message = Some(format!("`{value}` is not an E.164 phone number").into());
        Err(err)
    }
}

pub(crate) fn validate_urls(urls: &[String]) -> std::result::Result<(), ValidationError> {
    for raw in urls {
        if url::Url::parse(raw).is_err() {
            let mut err = ValidationError::new("url");
            err.message = Some(format!("`{raw}` is not a valid URL").into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, JsonSchema, Validate)]
    #[serde(rename_all = "camelCase")]
    struct RatioInput {
        /// A ratio.
        #[validate(range(min = 0.0, max = 1.0))]
        ratio: f64,
        label: Option<String>,
    }

    #[test]
    fn parse_params_reports_missing_field() {
        let err = parse_params::<RatioInput>("set_ratio", json!({})).unwrap_err();
        match err {
            AdapterError::InvalidParams { tool_name, reason } => {
                assert_eq!(tool_name, "set_ratio");
                assert!(reason.contains("ratio"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_params_reports_out_of_range_field() {
        let err = parse_params::<RatioInput>("set_ratio", json!({"ratio": 1.5})).unwrap_err();
        assert!(err.to_string().contains("ratio"), "{err}");
    }

    #[test]
    fn parse_params_treats_null_as_empty_object() {
        let params: NoParams = parse_params("list_voices", Value::Null).unwrap();
        let _ = params;
    }

    #[test]
    fn tool_definition_describes_fields() {
        let def = tool_definition::<RatioInput>("set_ratio", "Ratio tool");
        assert_eq!(def.name, "set_ratio");
        assert_eq!(def.parameters["type"], "object");
        assert_eq!(def.parameters["properties"]["ratio"]["description"], "A ratio.");
        assert!(def.parameters["properties"]["label"].is_object());
        assert_eq!(def.parameters["required"], json!(["ratio"]));
        assert!(def.parameters.get("$schema").is_none());
    }

    #[test]
    fn deleted_message_names_resource() {
        assert_eq!(
            deleted("Agent", "agent_1"),
            json!({"success": true, "message": "Agent agent_1 deleted successfully"})
        );
    }

    #[test]
    fn phone_number_validation() {
        assert!(validate_phone_number("+14155550100").is_ok());
        assert!(validate_phone_number("14155550100").is_err());
        assert!(validate_phone_number("+1-415").is_err());
    }
}
