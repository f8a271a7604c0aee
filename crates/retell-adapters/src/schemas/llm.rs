//! Retell LLM (response engine) shapes.
//!
//! An LLM carries a general prompt, a tool set, and optionally a state
//! graph.  When `states` is non-empty, `starting_state` must name one of
//! them.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Text LLM backing the response engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LlmModel {
    #[default]
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt-4.1-nano")]
    Gpt41Nano,
    #[serde(rename = "claude-3.7-sonnet")]
    Claude37Sonnet,
    #[serde(rename = "claude-3.5-haiku")]
    Claude35Haiku,
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[serde(rename = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,
}

/// Speech-to-speech model, used instead of a text model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum S2sModel {
    #[serde(rename = "gpt-4o-realtime")]
    Gpt4oRealtime,
    #[serde(rename = "gpt-4o-mini-realtime")]
    Gpt4oMiniRealtime,
}

// ---------------------------------------------------------------------------
// Tools and states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PredefinedDestination {
    Voicemail,
    Operator,
}

/// Where a `transfer_call` tool sends the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferDestination {
    /// A fixed number.
    Predefined {
        /// The number to transfer to, in E.164 format.
        number: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<PredefinedDestination>,
    },
    /// A number the LLM infers from the conversation.
    Inferred {
        /// Prompt telling the LLM how to pick the number.
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// A tool the LLM can call during a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmTool {
    /// Hang up the call.
    EndCall {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Transfer the call to another number.
    TransferCall {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        transfer_destination: TransferDestination,
    },
    /// Check Cal.com availability.
    CheckAvailabilityCal {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        cal_api_key: String,
        event_type_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    /// Book a Cal.com appointment.
    BookAppointmentCal {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        cal_api_key: String,
        event_type_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    /// Press a DTMF digit, e.g. to navigate an IVR.
    PressDigit {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        digit: Option<String>,
    },
    /// Call an external HTTP endpoint.
    Custom {
        name: String,
        description: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speak_during_execution: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speak_after_execution: Option<bool>,
        /// JSON schema of the arguments sent to `url`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<Value>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    #[default]
    Object,
}

/// JSON-schema object describing what an edge transition extracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeParameters {
    #[serde(rename = "type", default)]
    pub schema_type: ObjectType,
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// A transition out of a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StateEdge {
    pub destination_state_name: String,
    /// When the LLM should take this transition.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<EdgeParameters>,
}

/// A node in the conversation state graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LlmState {
    pub name: String,
    /// Prompt appended to the general prompt while in this state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<StateEdge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<LlmTool>>,
}

/// Check that `starting_state` names a declared state whenever states exist,
/// and that every edge points at one.
pub(crate) fn check_state_graph(
    states: Option<&[LlmState]>,
    starting_state: Option<&str>,
) -> Result<(), ValidationError> {
    let states = match states {
        Some(states) if !states.is_empty() => states,
        _ => return Ok(()),
    };
    let declared = |name: &str| states.iter().any(|s| s.name == name);

    match starting_state {
        None => {
            return Err(state_error(
                "starting_state is required when states are provided".to_string(),
            ));
        }
        Some(start) if !declared(start) => {
            return Err(state_error(format!(
                "starting_state `{start}` does not name a declared state"
            )));
        }
        Some(_) => {}
    }

    for state in states {
        for edge in state.edges.iter().flatten() {
            if !declared(&edge.destination_state_name) {
                return Err(state_error(format!(
                    "edge from `{}` points at undeclared state `{}`",
                    state.name, edge.destination_state_name
                )));
            }
        }
    }
    Ok(())
}

fn state_error(message: String) -> ValidationError {
    let mut err = ValidationError::new("starting_state");
    err.message = Some(message.into());
    err
}

// ---------------------------------------------------------------------------
// Settings (shared request body)
// ---------------------------------------------------------------------------

/// Full LLM configuration.
///
/// Used as the upstream body for create/update and as the inline response
/// engine accepted by the agent tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_llm_settings"))]
pub struct LlmSettings {
    /// Text model. Ignored when `s2s_model` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<LlmModel>,
    /// Speech-to-speech model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s2s_model: Option<S2sModel>,
    /// Sampling temperature (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub model_temperature: Option<f64>,
    /// Use the dedicated high-priority model pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_high_priority: Option<bool>,
    /// Enforce strict JSON for tool call arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_strict_mode: Option<bool>,
    /// System prompt shared by every state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_prompt: Option<String>,
    /// Tools available in every state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_tools: Option<Vec<LlmTool>>,
    /// Conversation state graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<LlmState>>,
    /// State the conversation starts in. Required when `states` is non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_state: Option<String>,
    /// First sentence the agent speaks. Empty means wait for the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_message: Option<String>,
    /// Default values for prompt dynamic variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dynamic_variables: Option<HashMap<String, String>>,
    /// Knowledge bases the LLM may retrieve from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base_ids: Option<Vec<String>>,
}

fn validate_llm_settings(settings: &LlmSettings) -> Result<(), ValidationError> {
    check_state_graph(settings.states.as_deref(), settings.starting_state.as_deref())
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for `create_retell_llm`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_create_llm"))]
pub struct CreateRetellLlmInput {
    /// System prompt shared by every state.
    #[validate(length(min = 1))]
    pub general_prompt: String,
    /// Text model.
    pub model: Option<LlmModel>,
    /// Speech-to-speech model.
    pub s2s_model: Option<S2sModel>,
    /// Sampling temperature (0-1).
    #[validate(range(min = 0.0, max = 1.0))]
    pub model_temperature: Option<f64>,
    /// Use the dedicated high-priority model pool.
    pub model_high_priority: Option<bool>,
    /// Enforce strict JSON for tool call arguments.
    pub tool_call_strict_mode: Option<bool>,
    /// Tools available in every state.
    pub general_tools: Option<Vec<LlmTool>>,
    /// Conversation state graph.
    pub states: Option<Vec<LlmState>>,
    /// State the conversation starts in. Required when `states` is non-empty.
    pub starting_state: Option<String>,
    /// First sentence the agent speaks.
    pub begin_message: Option<String>,
    /// Default values for prompt dynamic variables.
    pub default_dynamic_variables: Option<HashMap<String, String>>,
    /// Knowledge bases the LLM may retrieve from.
    pub knowledge_base_ids: Option<Vec<String>>,
}

fn validate_create_llm(input: &CreateRetellLlmInput) -> Result<(), ValidationError> {
    check_state_graph(input.states.as_deref(), input.starting_state.as_deref())
}

/// Input for `update_retell_llm`.  Only supplied fields are changed.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_update_llm"))]
pub struct UpdateRetellLlmInput {
    /// The ID of the LLM to update.
    #[serde(rename = "llmId")]
    #[validate(length(min = 1))]
    pub llm_id: String,
    /// System prompt shared by every state.
    pub general_prompt: Option<String>,
    /// Text model.
    pub model: Option<LlmModel>,
    /// Speech-to-speech model.
    pub s2s_model: Option<S2sModel>,
    /// Sampling temperature (0-1).
    #[validate(range(min = 0.0, max = 1.0))]
    pub model_temperature: Option<f64>,
    /// Use the dedicated high-priority model pool.
    pub model_high_priority: Option<bool>,
    /// Enforce strict JSON for tool call arguments.
    pub tool_call_strict_mode: Option<bool>,
    /// Tools available in every state.
    pub general_tools: Option<Vec<LlmTool>>,
    /// Conversation state graph.
    pub states: Option<Vec<LlmState>>,
    /// State the conversation starts in.
    pub starting_state: Option<String>,
    /// First sentence the agent speaks.
    pub begin_message: Option<String>,
    /// Default values for prompt dynamic variables.
    pub default_dynamic_variables: Option<HashMap<String, String>>,
    /// Knowledge bases the LLM may retrieve from.
    pub knowledge_base_ids: Option<Vec<String>>,
}

fn validate_update_llm(input: &UpdateRetellLlmInput) -> Result<(), ValidationError> {
    check_state_graph(input.states.as_deref(), input.starting_state.as_deref())
}

/// Input for tools addressing a single LLM.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct LlmIdInput {
    /// The ID of the Retell LLM.
    #[serde(rename = "llmId")]
    #[validate(length(min = 1))]
    pub llm_id: String,
}
