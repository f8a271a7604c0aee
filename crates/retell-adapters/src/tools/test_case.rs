//! Simulation test-case definition tools.
//!
//! These talk to the bearer-token API.  The adapter is always registered so
//! the tools are listed; missing credentials surface as an error when one of
//! them is called.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::client::{RequestOptions, UndocumentedHttpClient, encode_segment};
use crate::config::missing_undocumented_credentials;
use crate::error::{AdapterError, Result};
use crate::schemas::test_case::{
    ListTestCaseDefinitionsInput, TestCaseDefinitionIdInput, TestCaseDefinitionInput,
    UpdateTestCaseDefinitionInput,
};
use crate::schemas::{deleted, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::{test_case as transform, to_value};

/// Adapter for the test-case definition tools.
pub struct TestCaseDefinitionAdapter {
    id: String,
    client: Option<UndocumentedHttpClient>,
}

impl TestCaseDefinitionAdapter {
    pub fn new(id: impl Into<String>, client: Option<UndocumentedHttpClient>) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    fn client(&self) -> Result<&UndocumentedHttpClient> {
        self.client
            .as_ref()
            .ok_or_else(missing_undocumented_credentials)
    }

    async fn tool_list_test_case_definitions(&self, params: Value) -> Result<Value> {
        let input: ListTestCaseDefinitionsInput =
            parse_params("list_test_case_definitions", params)?;
        let client = self.client()?;
        let query = transform::list_query(&input)?;
        let definitions = client
            .get("/list-test-case-definitions", RequestOptions::with_query(query))
            .await?;
        to_value(&transform::test_cases_output(definitions)?)
    }

    async fn tool_create_test_case_definition(&self, params: Value) -> Result<Value> {
        let input: TestCaseDefinitionInput = parse_params("create_test_case_definition", params)?;
        let client = self.client()?;
        info!(name = %input.name, "creating test case definition");
        let body = serde_json::to_value(&input)?;
        let definition = client
            .post("/create-test-case-definition", RequestOptions::with_body(body))
            .await?;
        to_value(&transform::test_case_output(definition)?)
    }

    async fn tool_update_test_case_definition(&self, params: Value) -> Result<Value> {
        let input: UpdateTestCaseDefinitionInput =
            parse_params("update_test_case_definition", params)?;
        let client = self.client()?;
        let (id, body) = transform::update_request(input)?;
        let path = format!("/update-test-case-definition/{}", encode_segment(&id));
        let definition = client.put(&path, RequestOptions::with_body(body)).await?;
        to_value(&transform::test_case_output(definition)?)
    }

    async fn tool_delete_test_case_definition(&self, params: Value) -> Result<Value> {
        let input: TestCaseDefinitionIdInput =
            parse_params("delete_test_case_definition", params)?;
        let client = self.client()?;
        let path = format!(
            "/delete-test-case-definition/{}",
            encode_segment(&input.test_case_definition_id)
        );
        client.delete(&path, RequestOptions::default()).await?;
        Ok(deleted(
            "Test case definition",
            &input.test_case_definition_id,
        ))
    }
}

/// Tool definitions exposed by [`TestCaseDefinitionAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<ListTestCaseDefinitionsInput>(
            "list_test_case_definitions",
            "Lists simulation test case definitions for a Retell LLM",
        ),
        tool_definition::<TestCaseDefinitionInput>(
            "create_test_case_definition",
            "Creates a simulation test case definition",
        ),
        tool_definition::<UpdateTestCaseDefinitionInput>(
            "update_test_case_definition",
            "Replaces a simulation test case definition",
        ),
        tool_definition::<TestCaseDefinitionIdInput>(
            "delete_test_case_definition",
            "Deletes a simulation test case definition",
        ),
    ]
}

#[async_trait]
impl Adapter for TestCaseDefinitionAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::TestCaseDefinition
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "list_test_case_definitions" => self.tool_list_test_case_definitions(params).await,
            "create_test_case_definition" => {
                self.tool_create_test_case_definition(params).await
            }
            "update_test_case_definition" => {
                self.tool_update_test_case_definition(params).await
            }
            "delete_test_case_definition" => {
                self.tool_delete_test_case_definition(params).await
            }
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
    use crate::config::UndocumentedCredentials;
    use mockito::Matcher;
    use serde_json::json;

    fn adapter_for(server: &mockito::Server) -> TestCaseDefinitionAdapter {
        let credentials = UndocumentedCredentials {
            bearer_token: "tok".into(),
            org_id: "org_1".into(),
        };
        TestCaseDefinitionAdapter::new(
            "test_cases",
            Some(UndocumentedHttpClient::new(server.url(), &credentials)),
        )
    }

    #[tokio::test]
    async fn missing_credentials_fail_at_call_time() {
        let adapter = TestCaseDefinitionAdapter::new("test_cases", None);
        assert_eq!(adapter.tools().len(), 4);

        let err = adapter
            .execute_tool("list_test_case_definitions", json!({"llm_id": "llm_1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::ConfigError(_)));
    }

    #[tokio::test]
    async fn list_sends_query_with_org_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/list-test-case-definitions")
            .match_header("orgid", "org_1")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "retell-llm".into()),
                Matcher::UrlEncoded("llm_id".into(), "llm_1".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(r#"[{"test_case_definition_id": "tcd_1", "name": "greets"}]"#)
            .create_async()
            .await;

        let out = adapter_for(&server)
            .execute_tool("list_test_case_definitions", json!({"llm_id": "llm_1"}))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(out[0]["name"], "greets");
    }

    #[tokio::test]
    async fn create_fills_defaults_in_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/create-test-case-definition")
            .match_body(Matcher::PartialJson(json!({
                "name": "greets",
                "response_engine": {"type": "retell-llm", "llm_id": "llm_1"},
                "metrics": [],
                "tool_mocks": [],
                "llm_model": "gpt-4o"
            })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"test_case_definition_id": "tcd_1", "name": "greets"}"#)
            .create_async()
            .await;

        let out = adapter_for(&server)
            .execute_tool(
                "create_test_case_definition",
                json!({
                    "name": "greets",
                    "response_engine": {"llm_id": "llm_1"},
                    "user_prompt": "Say hello"
                }),
            )
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(out["test_case_definition_id"], "tcd_1");
    }

    #[tokio::test]
    async fn update_puts_to_definition_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/update-test-case-definition/tcd_1")
            .with_header("content-type", "application/json")
            .with_body(r#"{"test_case_definition_id": "tcd_1"}"#)
            .create_async()
            .await;

        adapter_for(&server)
            .execute_tool(
                "update_test_case_definition",
                json!({
                    "test_case_definition_id": "tcd_1",
                    "name": "n",
                    "response_engine": {"llm_id": "llm_1"},
                    "user_prompt": "p"
                }),
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_confirms() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/delete-test-case-definition/tcd_1")
            .with_status(204)
            .create_async()
            .await;

        let out = adapter_for(&server)
            .execute_tool(
                "delete_test_case_definition",
                json!({"test_case_definition_id": "tcd_1"}),
            )
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(
            out["message"],
            "Test case definition tcd_1 deleted successfully"
        );
    }
}
