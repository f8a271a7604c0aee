//! Call, web call and batch call shapes.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use super::validate_phone_number;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Inbound,
    #[default]
    Outbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    PhoneCall,
    WebCall,
}

/// Lifecycle of a call.  `completed`, `failed` and `canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Registered,
    InProgress,
    Completed,
    Failed,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserSentiment {
    Negative,
    Positive,
    Neutral,
    Unknown,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for `create_phone_call`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhoneCallInput {
    /// The number to call from, in E.164 format. Must be a number purchased from or imported to Retell.
    #[validate(custom(function = "validate_phone_number"))]
    pub from_number: String,
    /// The number to call, in E.164 format.
    #[validate(custom(function = "validate_phone_number"))]
    pub to_number: String,
    /// Agent to use for this call instead of the one bound to the number.
    pub override_agent_id: Option<String>,
    /// Version of the override agent.
    pub override_agent_version: Option<u32>,
    /// Call direction.
    #[serde(default)]
    pub direction: CallDirection,
    /// Arbitrary key/value data stored with the call.
    pub metadata: Option<HashMap<String, String>>,
    /// Dynamic variables injected into the Retell LLM prompt.
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
    /// Do not store transcripts or recordings for this call.
    pub opt_out_sensitive_data_storage: Option<bool>,
    /// Return signed URLs for recordings and logs.
    pub opt_in_signed_url: Option<bool>,
}

/// Input for `create_web_call`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebCallInput {
    /// The agent to use for the web call.
    #[validate(length(min = 1))]
    pub agent_id: String,
    /// Version of the agent to use.
    pub agent_version: Option<u32>,
    /// Arbitrary key/value data stored with the call.
    pub metadata: Option<HashMap<String, String>>,
    /// Dynamic variables injected into the Retell LLM prompt.
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
    /// Do not store transcripts or recordings for this call.
    pub opt_out_sensitive_data_storage: Option<bool>,
    /// Return signed URLs for recordings and logs.
    pub opt_in_signed_url: Option<bool>,
}

/// Input for tools addressing a single call.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CallIdInput {
    /// The ID of the call.
    #[validate(length(min = 1))]
    pub call_id: String,
}

/// Input for `list_calls`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListCallsInput {
    /// Only return calls handled by this agent.
    pub agent_id: Option<String>,
    /// Only return calls started at or after this time (ms since epoch).
    pub start_timestamp: Option<i64>,
    /// Only return calls started at or before this time (ms since epoch).
    pub end_timestamp: Option<i64>,
    /// Maximum number of calls to return (1-1000).
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u32>,
    /// Number of calls to skip.
    pub offset: Option<u32>,
    /// Sort by start time.
    pub sort_order: Option<SortOrder>,
}

/// Input for `update_call`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCallInput {
    /// The ID of the call to update.
    #[validate(length(min = 1))]
    pub call_id: String,
    /// Replacement metadata.
    pub metadata: Option<HashMap<String, String>>,
    /// Replacement dynamic variables.
    pub dynamic_variables: Option<HashMap<String, String>>,
    /// Do not store transcripts or recordings for this call.
    pub opt_out_sensitive_data_storage: Option<bool>,
}

/// One destination in a batch call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchCallTaskInput {
    /// The number to call, in E.164 format.
    pub to_number: String,
    /// Dynamic variables for this destination.
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
}

/// Input for `create_batch_call`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchCallInput {
    /// The number to call from, in E.164 format.
    #[validate(custom(function = "validate_phone_number"))]
    pub from_number: String,
    /// Name of the batch, shown in the dashboard.
    pub name: Option<String>,
    /// When to start the batch (ms since epoch). Starts immediately when omitted.
    pub trigger_timestamp: Option<i64>,
    /// Destinations to call.
    #[validate(length(min = 1), custom(function = "validate_batch_tasks"))]
    pub tasks: Vec<BatchCallTaskInput>,
}

fn validate_batch_tasks(tasks: &[BatchCallTaskInput]) -> Result<(), ValidationError> {
    tasks
        .iter()
        .try_for_each(|task| validate_phone_number(&task.to_number))
}

// ---------------------------------------------------------------------------
// Upstream requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePhoneCallRequest {
    pub from_number: String,
    pub to_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_agent_version: Option<u32>,
    pub direction: CallDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_out_sensitive_data_storage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_in_signed_url: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWebCallRequest {
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_out_sensitive_data_storage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_in_signed_url: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCallsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_out_sensitive_data_storage: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCallTaskRequest {
    pub to_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retell_llm_dynamic_variables: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBatchCallRequest {
    pub from_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_timestamp: Option<i64>,
    pub tasks: Vec<BatchCallTaskRequest>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCost {
    pub product: String,
    #[serde(alias = "unitPrice")]
    pub unit_price: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallCost {
    #[serde(default)]
    pub product_costs: Vec<ProductCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_one_time_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_voicemail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_sentiment: Option<UserSentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_successful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_analysis_data: Option<Value>,
}

/// Stable view of a call returned by every call tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallOutput {
    pub call_id: String,
    pub call_type: CallType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_version: Option<i64>,
    pub call_status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<CallDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retell_llm_dynamic_variables: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_log_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_analysis: Option<CallAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_cost: Option<CallCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_out_sensitive_data_storage: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCallOutput {
    pub batch_call_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_task_count: Option<u32>,
}
