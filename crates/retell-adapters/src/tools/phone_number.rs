//! Phone number tools.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::client::RetellClient;
use crate::error::{AdapterError, Result};
use crate::schemas::phone_number::{CreatePhoneNumberInput, PhoneNumberInput, UpdatePhoneNumberInput};
use crate::schemas::{NoParams, deleted, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::{phone_number as transform, require_found, to_value};

/// Adapter for the phone number tools.
pub struct PhoneNumberAdapter {
    id: String,
    client: RetellClient,
}

impl PhoneNumberAdapter {
    pub fn new(id: impl Into<String>, client: RetellClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    async fn tool_list_phone_numbers(&self, params: Value) -> Result<Value> {
        let _: NoParams = parse_params("list_phone_numbers", params)?;
        let numbers = self.client.list_phone_numbers().await?;
        to_value(&transform::phone_numbers_output(numbers)?)
    }

    async fn tool_create_phone_number(&self, params: Value) -> Result<Value> {
        let input: CreatePhoneNumberInput = parse_params("create_phone_number", params)?;
        let request = transform::create_phone_number_request(input);
        info!(area_code = request.area_code, "purchasing phone number");
        let number = self.client.create_phone_number(&request).await?;
        to_value(&transform::phone_number_output(number)?)
    }

    async fn tool_get_phone_number(&self, params: Value) -> Result<Value> {
        let input: PhoneNumberInput = parse_params("get_phone_number", params)?;
        let number = self.client.get_phone_number(&input.phone_number).await?;
        let number = require_found(number, "Phone number", &input.phone_number)?;
        to_value(&transform::phone_number_output(number)?)
    }

    async fn tool_update_phone_number(&self, params: Value) -> Result<Value> {
        let input: UpdatePhoneNumberInput = parse_params("update_phone_number", params)?;
        let (number, request) = transform::update_phone_number_request(input);
        let updated = self.client.update_phone_number(&number, &request).await?;
        to_value(&transform::phone_number_output(updated)?)
    }

    async fn tool_delete_phone_number(&self, params: Value) -> Result<Value> {
        let input: PhoneNumberInput = parse_params("delete_phone_number", params)?;
        self.client.delete_phone_number(&input.phone_number).await?;
        Ok(deleted("Phone number", &input.phone_number))
    }
}

/// Tool definitions exposed by [`PhoneNumberAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<NoParams>(
            "list_phone_numbers",
            "Lists all phone numbers in the Retell account",
        ),
        tool_definition::<CreatePhoneNumberInput>(
            "create_phone_number",
            "Purchases a new phone number in the given area code",
        ),
        tool_definition::<PhoneNumberInput>(
            "get_phone_number",
            "Gets details of a specific phone number",
        ),
        tool_definition::<UpdatePhoneNumberInput>(
            "update_phone_number",
            "Updates the agents, nickname or webhook bound to a phone number",
        ),
        tool_definition::<PhoneNumberInput>(
            "delete_phone_number",
            "Releases a phone number from the account",
        ),
    ]
}

#[async_trait]
impl Adapter for PhoneNumberAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::PhoneNumber
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "list_phone_numbers" => self.tool_list_phone_numbers(params).await,
            "create_phone_number" => self.tool_create_phone_number(params).await,
            "get_phone_number" => self.tool_get_phone_number(params).await,
            "update_phone_number" => self.tool_update_phone_number(params).await,
            "delete_phone_number" => self.tool_delete_phone_number(params).await,
            _ => Err(AdapterError::ToolNotFound {
                adapter_id: self.id.clone(),
                tool_name: name.to_string(),
            }),
        }
    }
}
