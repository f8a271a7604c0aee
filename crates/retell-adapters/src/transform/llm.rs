use serde_json::Value;

use super::{OutputShape, project, project_list};
use crate::error::Result;
use crate::schemas::llm::{CreateRetellLlmInput, LlmSettings, UpdateRetellLlmInput};

/// Prompt used when an agent is given an inline LLM without one.
pub const DEFAULT_GENERAL_PROMPT: &str = "You are a helpful agent";

const LLM_SHAPE: OutputShape = OutputShape {
    required: &["llm_id"],
    optional: &[
        "version",
        "is_published",
        "model_temperature",
        "model_high_priority",
        "tool_call_strict_mode",
        "general_prompt",
        "general_tools",
        "states",
        "starting_state",
        "begin_message",
        "default_dynamic_variables",
        "knowledge_base_ids",
        "last_modification_timestamp",
    ],
    nullable: &["model", "s2s_model"],
};

pub fn create_llm_request(input: CreateRetellLlmInput) -> LlmSettings {
    LlmSettings {
        model: input.model,
        s2s_model: input.s2s_model,
        model_temperature: input.model_temperature,
        model_high_priority: input.model_high_priority,
        tool_call_strict_mode: input.tool_call_strict_mode,
        general_prompt: Some(input.general_prompt),
        general_tools: input.general_tools,
        states: input.states,
        starting_state: input.starting_state,
        begin_message: input.begin_message,
        default_dynamic_variables: input.default_dynamic_variables,
        knowledge_base_ids: input.knowledge_base_ids,
    }
}

/// Split the LLM id from the update body.
pub fn update_llm_request(input: UpdateRetellLlmInput) -> (String, LlmSettings) {
    (
        input.llm_id,
        LlmSettings {
            model: input.model,
            s2s_model: input.s2s_model,
            model_temperature: input.model_temperature,
            model_high_priority: input.model_high_priority,
            tool_call_strict_mode: input.tool_call_strict_mode,
            general_prompt: input.general_prompt,
            general_tools: input.general_tools,
            states: input.states,
            starting_state: input.starting_state,
            begin_message: input.begin_message,
            default_dynamic_variables: input.default_dynamic_variables,
            knowledge_base_ids: input.knowledge_base_ids,
        },
    )
}

/// Body for the LLM created when `update_agent` gives an agent with no bound
/// LLM an inline response engine.
pub fn inline_llm_request(mut settings: LlmSettings) -> LlmSettings {
    if settings.general_prompt.is_none() {
        settings.general_prompt = Some(DEFAULT_GENERAL_PROMPT.to_string());
    }
    settings
}

pub fn llm_output(value: &Value) -> Result<Value> {
    project("retell_llm", value, &LLM_SHAPE)
}

pub fn llms_output(value: &Value) -> Result<Value> {
    project_list("list_retell_llms", value, &LLM_SHAPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_params;
    use serde_json::json;

    #[test]
    fn output_fills_nullable_models() {
        let out = llm_output(&json!({
            "llm_id": "llm_1",
            "version": 3,
            "general_prompt": "Hi",
            "llm_websocket_url": "wss://ignored"
        }))
        .unwrap();
        assert_eq!(
            out,
            json!({
                "llm_id": "llm_1",
                "version": 3,
                "general_prompt": "Hi",
                "model": null,
                "s2s_model": null
            })
        );
    }

    #[test]
    fn create_round_trip_restores_overlapping_fields() {
        let input: CreateRetellLlmInput = parse_params(
            "create_retell_llm",
            json!({
                "general_prompt": "You book tables",
                "model": "claude-3.7-sonnet",
                "model_temperature": 0.2,
                "begin_message": "Hello!",
                "knowledge_base_ids": ["kb_1"]
            }),
        )
        .unwrap();
        let mut echo = serde_json::to_value(create_llm_request(input)).unwrap();
        echo["llm_id"] = json!("llm_9");
        let out = llm_output(&echo).unwrap();
        assert_eq!(out["general_prompt"], "You book tables");
        assert_eq!(out["model"], "claude-3.7-sonnet");
        assert_eq!(out["model_temperature"], 0.2);
        assert_eq!(out["begin_message"], "Hello!");
        assert_eq!(out["knowledge_base_ids"], json!(["kb_1"]));
        assert_eq!(out["s2s_model"], Value::Null);
    }

    #[test]
    fn inline_request_defaults_prompt() {
        let body = inline_llm_request(LlmSettings::default());
        assert_eq!(body.general_prompt.as_deref(), Some(DEFAULT_GENERAL_PROMPT));

        let body = inline_llm_request(LlmSettings {
            general_prompt: Some("Custom".into()),
            ..LlmSettings::default()
        });
        assert_eq!(body.general_prompt.as_deref(), Some("Custom"));
    }

    #[test]
    fn update_splits_id_and_omits_absent_fields() {
        let input: UpdateRetellLlmInput = parse_params(
            "update_retell_llm",
            json!({"llmId": "llm_1", "begin_message": ""}),
        )
        .unwrap();
        let (id, body) = update_llm_request(input);
        assert_eq!(id, "llm_1");
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"begin_message": ""}));
    }
}
