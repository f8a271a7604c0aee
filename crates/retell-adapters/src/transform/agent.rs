//! Agent conversions.
//!
//! An agent write may carry an inline LLM configuration.  The transforms
//! here only split that configuration out into an [`AgentPlan`]; the agent
//! tool performs the LLM write and then binds the result with
//! [`AgentPlan::bind_llm`].

use serde_json::{Value, json};

use super::{OutputShape, project, project_list};
use crate::error::Result;
use crate::schemas::agent::{
    AGENT_OUTPUT_FIELDS, AgentRequest, CreateAgentInput, PublishAgentInput, PublishAgentRequest,
    ResponseEngineInput, ResponseEngineRef, UpdateAgentInput,
};
use crate::schemas::llm::LlmSettings;

const AGENT_SHAPE: OutputShape = OutputShape {
    required: &["agent_id"],
    optional: AGENT_OUTPUT_FIELDS,
    nullable: &[],
};

/// An agent write, plus the LLM configuration that must be written first
/// when the response engine was supplied inline.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPlan {
    pub request: AgentRequest,
    pub inline_llm: Option<LlmSettings>,
}

impl AgentPlan {
    /// Point the agent at a freshly written LLM.
    pub fn bind_llm(&mut self, llm_id: impl Into<String>, version: Option<i64>) {
        self.request.response_engine =
            Some(ResponseEngineRef::retell_llm(llm_id, Some(version.unwrap_or(0))));
    }
}

fn split_engine(engine: Option<ResponseEngineInput>) -> (Option<ResponseEngineRef>, Option<LlmSettings>) {
    match engine {
        Some(ResponseEngineInput::Reference(reference)) => (Some(reference), None),
        Some(ResponseEngineInput::Inline(settings)) => (None, Some(*settings)),
        None => (None, None),
    }
}

pub fn create_agent_plan(input: CreateAgentInput) -> AgentPlan {
    let (response_engine, inline_llm) = split_engine(Some(input.response_engine));
    AgentPlan {
        request: AgentRequest {
            response_engine,
            voice_id: Some(input.voice_id),
            settings: input.settings,
        },
        inline_llm,
    }
}

/// Split the agent id from the update plan.
pub fn update_agent_plan(input: UpdateAgentInput) -> (String, AgentPlan) {
    let (response_engine, inline_llm) = split_engine(input.response_engine);
    (
        input.agent_id,
        AgentPlan {
            request: AgentRequest {
                response_engine,
                voice_id: input.voice_id,
                settings: input.settings,
            },
            inline_llm,
        },
    )
}

pub fn publish_agent_request(input: PublishAgentInput) -> (String, PublishAgentRequest) {
    (
        input.agent_id,
        PublishAgentRequest {
            version_description: input.version_description,
        },
    )
}

/// The LLM id an upstream agent's response engine points at, if any.
pub fn bound_llm_id(agent: &Value) -> Option<&str> {
    agent
        .get("response_engine")
        .and_then(|engine| engine.get("llm_id"))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

pub fn agent_output(value: &Value) -> Result<Value> {
    project("agent", value, &AGENT_SHAPE)
}

pub fn agents_output(value: &Value) -> Result<Value> {
    project_list("list_agents", value, &AGENT_SHAPE)
}

/// Publish answers with an empty body or the published agent.
pub fn publish_output(agent_id: &str, value: &Value) -> Value {
    let mut out = json!({
        "success": true,
        "agent_id": agent_id,
        "message": format!("Agent {agent_id} published successfully"),
    });
    for key in ["version", "is_published"] {
        if let Some(field) = value.get(key) {
            out[key] = field.clone();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_params;

    #[test]
    fn inline_engine_is_split_out() {
        let input: CreateAgentInput = parse_params(
            "create_agent",
            json!({
                "response_engine": {"general_prompt": "Greet callers"},
                "voice_id": "11labs-Adrian",
                "language": "en-GB"
            }),
        )
        .unwrap();
        let mut plan = create_agent_plan(input);
        assert!(plan.request.response_engine.is_none());
        assert_eq!(
            plan.inline_llm.as_ref().and_then(|s| s.general_prompt.as_deref()),
            Some("Greet callers")
        );

        plan.bind_llm("llm_7", None);
        assert_eq!(
            serde_json::to_value(&plan.request).unwrap(),
            json!({
                "response_engine": {"type": "retell-llm", "llm_id": "llm_7", "version": 0},
                "voice_id": "11labs-Adrian",
                "language": "en-GB"
            })
        );
    }

    #[test]
    fn update_without_engine_sends_only_supplied_fields() {
        let input: UpdateAgentInput = parse_params(
            "update_agent",
            json!({"agentId": "agent_1", "voice_speed": 1.1}),
        )
        .unwrap();
        let (id, plan) = update_agent_plan(input);
        assert_eq!(id, "agent_1");
        assert!(plan.inline_llm.is_none());
        assert_eq!(
            serde_json::to_value(&plan.request).unwrap(),
            json!({"voice_speed": 1.1})
        );
    }

    #[test]
    fn bound_llm_id_reads_response_engine() {
        let agent = json!({"agent_id": "a", "response_engine": {"type": "retell-llm", "llm_id": "llm_3"}});
        assert_eq!(bound_llm_id(&agent), Some("llm_3"));
        assert_eq!(bound_llm_id(&json!({"agent_id": "a"})), None);
    }

    #[test]
    fn agent_round_trip_restores_overlapping_fields() {
        let input: CreateAgentInput = parse_params(
            "create_agent",
            json!({
                "response_engine": {"type": "retell-llm", "llm_id": "llm_1", "version": 1},
                "voice_id": "11labs-Adrian",
                "agent_name": "Concierge",
                "responsiveness": 0.8,
                "stt_mode": "accurate",
                "backchannel_words": ["yeah", "ok"]
            }),
        )
        .unwrap();
        let mut echo = serde_json::to_value(create_agent_plan(input).request).unwrap();
        echo["agent_id"] = json!("agent_1");
        echo["llm_websocket_url"] = json!("wss://dropped");

        let out = agent_output(&echo).unwrap();
        assert_eq!(
            out,
            json!({
                "agent_id": "agent_1",
                "response_engine": {"type": "retell-llm", "llm_id": "llm_1", "version": 1},
                "voice_id": "11labs-Adrian",
                "agent_name": "Concierge",
                "responsiveness": 0.8,
                "backchannel_words": ["yeah", "ok"],
                "stt_mode": "accurate"
            })
        );
    }

    #[test]
    fn publish_output_echoes_upstream_version() {
        let out = publish_output("agent_1", &json!({"version": 4, "is_published": true}));
        assert_eq!(out["version"], 4);
        assert_eq!(out["is_published"], true);
        let out = publish_output("agent_1", &Value::Null);
        assert_eq!(out["message"], "Agent agent_1 published successfully");
        assert!(out.get("version").is_none());
    }
}
