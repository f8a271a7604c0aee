//! Call tools: phone, web and batch calls.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::client::RetellClient;
use crate::error::{AdapterError, Result};
use crate::schemas::call::{
    CallIdInput, CreateBatchCallInput, CreatePhoneCallInput, CreateWebCallInput, ListCallsInput,
    UpdateCallInput,
};
use crate::schemas::{deleted, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::{call as transform, require_found, to_value};

/// Adapter for the call tools.
pub struct CallAdapter {
    id: String,
    client: RetellClient,
}

impl CallAdapter {
    pub fn new(id: impl Into<String>, client: RetellClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    async fn tool_create_phone_call(&self, params: Value) -> Result<Value> {
        let input: CreatePhoneCallInput = parse_params("create_phone_call", params)?;
        let request = transform::phone_call_request(input);
        info!(to = %request.to_number, "creating phone call");
        let call = self.client.create_phone_call(&request).await?;
        to_value(&transform::call_output(call)?)
    }

    async fn tool_create_web_call(&self, params: Value) -> Result<Value> {
        let input: CreateWebCallInput = parse_params("create_web_call", params)?;
        let request = transform::web_call_request(input);
        let call = self.client.create_web_call(&request).await?;
        to_value(&transform::call_output(call)?)
    }

    async fn tool_get_call(&self, params: Value) -> Result<Value> {
        let input: CallIdInput = parse_params("get_call", params)?;
        let call = self.client.get_call(&input.call_id).await?;
        let call = require_found(call, "Call", &input.call_id)?;
        to_value(&transform::call_output(call)?)
    }

    async fn tool_list_calls(&self, params: Value) -> Result<Value> {
        let input: ListCallsInput = parse_params("list_calls", params)?;
        let calls = self
            .client
            .list_calls(&transform::list_calls_request(input))
            .await?;
        to_value(&transform::calls_output(calls)?)
    }

    async fn tool_update_call(&self, params: Value) -> Result<Value> {
        let input: UpdateCallInput = parse_params("update_call", params)?;
        let (call_id, request) = transform::update_call_request(input);
        let call = self.client.update_call(&call_id, &request).await?;
        to_value(&transform::call_output(call)?)
    }

    async fn tool_delete_call(&self, params: Value) -> Result<Value> {
        let input: CallIdInput = parse_params("delete_call", params)?;
        self.client.delete_call(&input.call_id).await?;
        Ok(deleted("Call", &input.call_id))
    }

    async fn tool_create_batch_call(&self, params: Value) -> Result<Value> {
        let input: CreateBatchCallInput = parse_params("create_batch_call", params)?;
        let request = transform::batch_call_request(input);
        info!(tasks = request.tasks.len(), "creating batch call");
        let batch = self.client.create_batch_call(&request).await?;
        to_value(&transform::batch_call_output(batch)?)
    }
}

/// Tool definitions exposed by [`CallAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<CreatePhoneCallInput>(
            "create_phone_call",
            "Creates a new outbound phone call",
        ),
        tool_definition::<CreateWebCallInput>("create_web_call", "Creates a new web call"),
        tool_definition::<CallIdInput>("get_call", "Retrieves details of a specific call"),
        tool_definition::<ListCallsInput>(
            "list_calls",
            "Lists calls, optionally filtered by agent and time range",
        ),
        tool_definition::<UpdateCallInput>(
            "update_call",
            "Updates the metadata or dynamic variables of an existing call",
        ),
        tool_definition::<CallIdInput>("delete_call", "Deletes a specific call"),
        tool_definition::<CreateBatchCallInput>(
            "create_batch_call",
            "Creates a batch of outbound calls from one number",
        ),
    ]
}

#[async_trait]
impl Adapter for CallAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::Call
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "create_phone_call" => self.tool_create_phone_call(params).await,
            "create_web_call" => self.tool_create_web_call(params).await,
            "get_call" => self.tool_get_call(params).await,
            "list_calls" => self.tool_list_calls(params).await,
            "update_call" => self.tool_update_call(params).await,
            "delete_call" => self.tool_delete_call(params).await,
            "create_batch_call" => self.tool_create_batch_call(params).await,
            _ => Err(AdapterError::ToolNotFound {
                adapter_id: self.id.clone(),
                tool_name: name.to_string(),
            }),
        }
    }
}
