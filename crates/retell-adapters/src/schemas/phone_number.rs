//! Phone number shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_phone_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NumberProvider {
    Twilio,
    Telnyx,
}

/// Input for `create_phone_number`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhoneNumberInput {
    /// US area code for the new number, e.g. 415.
    #[validate(range(min = 200, max = 999))]
    pub area_code: u16,
    /// Agent answering inbound calls. Inbound calls are rejected when unset.
    pub inbound_agent_id: Option<String>,
    /// Agent used for outbound calls from this number.
    pub outbound_agent_id: Option<String>,
    /// Friendly name for the number.
    pub nickname: Option<String>,
    /// Webhook consulted on inbound calls to override the agent.
    #[validate(url)]
    pub inbound_webhook_url: Option<String>,
    /// Carrier to purchase the number from.
    pub number_provider: Option<NumberProvider>,
}

/// Input for tools addressing a single phone number.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberInput {
    /// The phone number, in E.164 format.
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

/// Input for `update_phone_number`.  Only supplied fields are changed.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhoneNumberInput {
    /// The phone number to update, in E.164 format.
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    /// Agent answering inbound calls.
    pub inbound_agent_id: Option<String>,
    /// Agent used for outbound calls.
    pub outbound_agent_id: Option<String>,
    /// Friendly name for the number.
    pub nickname: Option<String>,
    /// Webhook consulted on inbound calls.
    #[validate(url)]
    pub inbound_webhook_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Upstream requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePhoneNumberRequest {
    pub area_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_provider: Option<NumberProvider>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePhoneNumberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_webhook_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Stable view of a phone number.  Agent bindings, nickname and webhook are
/// always present and `null` when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumberOutput {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number_pretty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number_type: Option<String>,
    #[serde(default)]
    pub inbound_agent_id: Option<String>,
    #[serde(default)]
    pub outbound_agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_code: Option<u16>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub inbound_webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modification_timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_params;
    use serde_json::json;

    #[test]
    fn area_code_must_be_three_digits() {
        let err = parse_params::<CreatePhoneNumberInput>(
            "create_phone_number",
            json!({"areaCode": 41}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("range"), "{err}");
    }

    #[test]
    fn webhook_must_be_a_url() {
        let err = parse_params::<UpdatePhoneNumberInput>(
            "update_phone_number",
            json!({"phoneNumber": "+14155550100", "inboundWebhookUrl": "nope"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("url"), "{err}");
    }

    #[test]
    fn output_keeps_nullable_fields_as_null() {
        let output: PhoneNumberOutput =
            serde_json::from_value(json!({"phone_number": "+14155550100", "area_code": 415}))
                .unwrap();
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "phone_number": "+14155550100",
                "inbound_agent_id": null,
                "outbound_agent_id": null,
                "area_code": 415,
                "nickname": null,
                "inbound_webhook_url": null
            })
        );
    }
}
