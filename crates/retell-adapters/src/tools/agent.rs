//! Agent tools.
//!
//! Agent create and update accept an inline LLM configuration in place of a
//! response engine reference.  The LLM is written first and the agent is
//! then pointed at it.  The two writes are not atomic: if the agent write
//! fails, the LLM is left behind and its id is logged.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::RetellClient;
use crate::error::{AdapterError, Result};
use crate::schemas::agent::{AgentIdInput, CreateAgentInput, PublishAgentInput, UpdateAgentInput};
use crate::schemas::llm::LlmSettings;
use crate::schemas::{NoParams, deleted, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::agent::{self as transform, AgentPlan};
use crate::transform::llm::inline_llm_request;
use crate::transform::require_found;

/// Adapter for the agent tools.
pub struct AgentAdapter {
    id: String,
    client: RetellClient,
}

/// The `(llm_id, version)` of an upstream LLM body.
fn llm_identity(llm: &Value) -> Result<(String, Option<i64>)> {
    let llm_id = llm
        .get("llm_id")
        .and_then(Value::as_str)
        .ok_or_else(|| AdapterError::UnexpectedResponse {
            operation: "create_retell_llm".into(),
            reason: "response has no `llm_id`".into(),
        })?;
    Ok((llm_id.to_string(), llm.get("version").and_then(Value::as_i64)))
}

impl AgentAdapter {
    pub fn new(id: impl Into<String>, client: RetellClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    /// Create an LLM from `body` and bind the agent to it.  Returns the id of
    /// the created LLM.
    async fn create_inline_llm(&self, plan: &mut AgentPlan, body: &LlmSettings) -> Result<String> {
        let llm = self.client.create_retell_llm(body).await?;
        let (llm_id, version) = llm_identity(&llm)?;
        info!(llm_id = %llm_id, "created LLM for inline response engine");
        plan.bind_llm(llm_id.clone(), version);
        Ok(llm_id)
    }

    fn log_orphan(created_llm: Option<&str>, agent: &str, err: &AdapterError) {
        if let Some(llm_id) = created_llm {
            warn!(
                llm_id = %llm_id,
                agent = %agent,
                error = %err,
                "agent write failed after creating its LLM; the LLM was not removed"
            );
        }
    }

    async fn tool_list_agents(&self, params: Value) -> Result<Value> {
        let _: NoParams = parse_params("list_agents", params)?;
        let agents = self.client.list_agents().await?;
        transform::agents_output(&agents)
    }

    async fn tool_create_agent(&self, params: Value) -> Result<Value> {
        let input: CreateAgentInput = parse_params("create_agent", params)?;
        let mut plan = transform::create_agent_plan(input);
        let created_llm = match plan.inline_llm.take() {
            Some(settings) => Some(self.create_inline_llm(&mut plan, &settings).await?),
            None => None,
        };

        let agent = self
            .client
            .create_agent(&plan.request)
            .await
            .inspect_err(|e| Self::log_orphan(created_llm.as_deref(), "<new>", e))?;
        transform::agent_output(&agent)
    }

    async fn tool_get_agent(&self, params: Value) -> Result<Value> {
        let input: AgentIdInput = parse_params("get_agent", params)?;
        let agent = self.client.get_agent(&input.agent_id).await?;
        let agent = require_found(agent, "Agent", &input.agent_id)?;
        transform::agent_output(&agent)
    }

    async fn tool_update_agent(&self, params: Value) -> Result<Value> {
        let input: UpdateAgentInput = parse_params("update_agent", params)?;
        let (agent_id, mut plan) = transform::update_agent_plan(input);

        let mut created_llm = None;
        if let Some(settings) = plan.inline_llm.take() {
            let current = self.client.get_agent(&agent_id).await?;
            let current = require_found(current, "Agent", &agent_id)?;
            match transform::bound_llm_id(&current) {
                Some(llm_id) => {
                    info!(llm_id = %llm_id, agent = %agent_id, "applying inline LLM changes");
                    self.client.update_retell_llm(llm_id, &settings).await?;
                    plan.request.response_engine = None;
                }
                None => {
                    let body = inline_llm_request(settings);
                    created_llm = Some(self.create_inline_llm(&mut plan, &body).await?);
                }
            }
        }

        let agent = self
            .client
            .update_agent(&agent_id, &plan.request)
            .await
            .inspect_err(|e| Self::log_orphan(created_llm.as_deref(), &agent_id, e))?;
        transform::agent_output(&agent)
    }

    async fn tool_delete_agent(&self, params: Value) -> Result<Value> {
        let input: AgentIdInput = parse_params("delete_agent", params)?;
        self.client.delete_agent(&input.agent_id).await?;
        Ok(deleted("Agent", &input.agent_id))
    }

    async fn tool_get_agent_versions(&self, params: Value) -> Result<Value> {
        let input: AgentIdInput = parse_params("get_agent_versions", params)?;
        let versions = self.client.get_agent_versions(&input.agent_id).await?;
        transform::agents_output(&versions)
    }

    async fn tool_publish_agent(&self, params: Value) -> Result<Value> {
        let input: PublishAgentInput = parse_params("publish_agent", params)?;
        let (agent_id, request) = transform::publish_agent_request(input);
        let published = self.client.publish_agent(&agent_id, &request).await?;
        Ok(transform::publish_output(&agent_id, &published))
    }
}

/// Tool definitions exposed by [`AgentAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<NoParams>("list_agents", "Lists all Retell agents"),
        tool_definition::<CreateAgentInput>(
            "create_agent",
            "Creates a new Retell agent. The response engine may reference an existing LLM or \
             describe a new one inline.",
        ),
        tool_definition::<AgentIdInput>("get_agent", "Gets a Retell agent by ID"),
        tool_definition::<UpdateAgentInput>(
            "update_agent",
            "Updates an existing Retell agent. An inline response engine updates the agent's \
             current LLM, or creates one if it has none.",
        ),
        tool_definition::<AgentIdInput>("delete_agent", "Deletes a Retell agent"),
        tool_definition::<AgentIdInput>(
            "get_agent_versions",
            "Gets all versions of a Retell agent",
        ),
        tool_definition::<PublishAgentInput>(
            "publish_agent",
            "Publishes the latest draft of a Retell agent as a new version",
        ),
    ]
}

#[async_trait]
impl Adapter for AgentAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::Agent
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "list_agents" => self.tool_list_agents(params).await,
            "create_agent" => self.tool_create_agent(params).await,
            "get_agent" => self.tool_get_agent(params).await,
            "update_agent" => self.tool_update_agent(params).await,
            "delete_agent" => self.tool_delete_agent(params).await,
            "get_agent_versions" => self.tool_get_agent_versions(params).await,
            "publish_agent" => self.tool_publish_agent(params).await,
            _ => Err(AdapterError::ToolNotFound {
                adapter_id: self.id.clone(),
                tool_name: name.to_string(),
            }),
        }
    }
}
