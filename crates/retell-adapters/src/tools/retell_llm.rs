//! Retell LLM tools.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::RetellClient;
use crate::error::{AdapterError, Result};
use crate::schemas::llm::{CreateRetellLlmInput, LlmIdInput, UpdateRetellLlmInput};
use crate::schemas::{NoParams, deleted, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::{llm as transform, require_found};

/// Adapter for the Retell LLM tools.
pub struct RetellLlmAdapter {
    id: String,
    client: RetellClient,
}

impl RetellLlmAdapter {
    pub fn new(id: impl Into<String>, client: RetellClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    async fn tool_list_retell_llms(&self, params: Value) -> Result<Value> {
        let _: NoParams = parse_params("list_retell_llms", params)?;
        let llms = self.client.list_retell_llms().await?;
        transform::llms_output(&llms)
    }

    async fn tool_create_retell_llm(&self, params: Value) -> Result<Value> {
        let input: CreateRetellLlmInput = parse_params("create_retell_llm", params)?;
        let llm = self
            .client
            .create_retell_llm(&transform::create_llm_request(input))
            .await?;
        transform::llm_output(&llm)
    }

    async fn tool_get_retell_llm(&self, params: Value) -> Result<Value> {
        let input: LlmIdInput = parse_params("get_retell_llm", params)?;
        let llm = self.client.get_retell_llm(&input.llm_id).await?;
        let llm = require_found(llm, "Retell LLM", &input.llm_id)?;
        transform::llm_output(&llm)
    }

    async fn tool_update_retell_llm(&self, params: Value) -> Result<Value> {
        let input: UpdateRetellLlmInput = parse_params("update_retell_llm", params)?;
        let (llm_id, request) = transform::update_llm_request(input);
        let llm = self.client.update_retell_llm(&llm_id, &request).await?;
        transform::llm_output(&llm)
    }

    async fn tool_delete_retell_llm(&self, params: Value) -> Result<Value> {
        let input: LlmIdInput = parse_params("delete_retell_llm", params)?;
        self.client.delete_retell_llm(&input.llm_id).await?;
        Ok(deleted("Retell LLM", &input.llm_id))
    }
}

/// Tool definitions exposed by [`RetellLlmAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<NoParams>("list_retell_llms", "Lists all Retell LLMs"),
        tool_definition::<CreateRetellLlmInput>(
            "create_retell_llm",
            "Creates a new Retell LLM with a prompt, tools and optional state graph",
        ),
        tool_definition::<LlmIdInput>("get_retell_llm", "Gets a Retell LLM by ID"),
        tool_definition::<UpdateRetellLlmInput>(
            "update_retell_llm",
            "Updates an existing Retell LLM",
        ),
        tool_definition::<LlmIdInput>("delete_retell_llm", "Deletes a Retell LLM"),
    ]
}

#[async_trait]
impl Adapter for RetellLlmAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::RetellLlm
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "list_retell_llms" => self.tool_list_retell_llms(params).await,
            "create_retell_llm" => self.tool_create_retell_llm(params).await,
            "get_retell_llm" => self.tool_get_retell_llm(params).await,
            "update_retell_llm" => self.tool_update_retell_llm(params).await,
            "delete_retell_llm" => self.tool_delete_retell_llm(params).await,
            _ => Err(AdapterError::ToolNotFound {
                adapter_id: self.id.clone(),
                tool_name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    #[tokio::test]
    async fn create_posts_full_configuration() {
        let transport = RecordingTransport::new();
        let adapter = RetellLlmAdapter::new("llms", transport.client());
        transport.respond(json!({"llm_id": "llm_1", "version": 0, "general_prompt": "p"}));

        let out = adapter
            .execute_tool(
                "create_retell_llm",
                json!({
                    "general_prompt": "p",
                    "general_tools": [{"type": "end_call", "name": "bye", "description": "Hang up"}],
                    "states": [{"name": "start"}],
                    "starting_state": "start"
                }),
            )
            .await
            .unwrap();
        assert_eq!(out["llm_id"], "llm_1");
        assert_eq!(out["model"], Value::Null);
        assert_eq!(
            transport.requests()[0].json_body(),
            Some(&json!({
                "general_prompt": "p",
                "general_tools": [{"type": "end_call", "name": "bye", "description": "Hang up"}],
                "states": [{"name": "start"}],
                "starting_state": "start"
            }))
        );
    }

    #[tokio::test]
    async fn undeclared_starting_state_is_rejected_before_request() {
        let transport = RecordingTransport::new();
        let adapter = RetellLlmAdapter::new("llms", transport.client());
        let err = adapter
            .execute_tool(
                "update_retell_llm",
                json!({"llmId": "llm_1", "states": [{"name": "a"}], "starting_state": "b"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidParams { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let transport = RecordingTransport::new();
        let adapter = RetellLlmAdapter::new("llms", transport.client());
        transport.respond(json!({"llm_id": "llm_1", "model": "gpt-4.1"}));
        let out = adapter
            .execute_tool("update_retell_llm", json!({"llmId": "llm_1", "model": "gpt-4.1"}))
            .await
            .unwrap();
        assert_eq!(out["model"], "gpt-4.1");
        let request = &transport.requests()[0];
        assert_eq!(request.path, "/update-retell-llm/llm_1");
        assert_eq!(request.json_body(), Some(&json!({"model": "gpt-4.1"})));
    }

    #[tokio::test]
    async fn delete_confirms() {
        let transport = RecordingTransport::new();
        let adapter = RetellLlmAdapter::new("llms", transport.client());
        let out = adapter
            .execute_tool("delete_retell_llm", json!({"llmId": "llm_1"}))
            .await
            .unwrap();
        assert_eq!(out["message"], "Retell LLM llm_1 deleted successfully");
    }
}
