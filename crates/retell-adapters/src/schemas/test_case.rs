//! Simulation test-case definition shapes (undocumented API).

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use super::agent::{ResponseEngineRef, ResponseEngineType};
use super::llm::LlmModel;

/// How a tool mock decides whether it applies to a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputMatchRule {
    /// Match every invocation.
    #[default]
    Any,
    /// Match invocations whose arguments contain these values.
    PartialMatch { args: Map<String, Value> },
}

/// Canned result for a tool invoked during a simulated conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMock {
    pub tool_name: String,
    #[serde(default)]
    pub input_match_rule: InputMatchRule,
    /// Value returned to the LLM.
    pub output: String,
    /// Whether the invocation is reported as successful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,
}

/// A test-case definition body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct TestCaseDefinitionInput {
    /// Name of the test case.
    #[validate(length(min = 1))]
    pub name: String,
    /// The LLM under test.
    pub response_engine: ResponseEngineRef,
    /// Instructions for the simulated user.
    #[validate(length(min = 1))]
    pub user_prompt: String,
    /// Criteria the conversation is graded on.
    #[serde(default)]
    pub metrics: Vec<String>,
    /// Dynamic variables injected into the prompt.
    #[serde(default)]
    pub dynamic_variables: HashMap<String, String>,
    /// Canned tool results.
    #[serde(default)]
    pub tool_mocks: Vec<ToolMock>,
    /// Model that plays the simulated user.
    #[serde(default)]
    pub llm_model: LlmModel,
}

/// Input for `update_test_case_definition`.  Replaces the whole definition.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTestCaseDefinitionInput {
    /// The ID of the test case definition to replace.
    pub test_case_definition_id: String,
    #[serde(flatten)]
    pub definition: TestCaseDefinitionInput,
}

impl Validate for UpdateTestCaseDefinitionInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.test_case_definition_id.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add(
                "test_case_definition_id",
                validator::ValidationError::new("length"),
            );
            return Err(errors);
        }
        self.definition.validate()
    }
}

/// Input for `delete_test_case_definition`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct TestCaseDefinitionIdInput {
    /// The ID of the test case definition.
    #[validate(length(min = 1))]
    pub test_case_definition_id: String,
}

/// Input for `list_test_case_definitions`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct ListTestCaseDefinitionsInput {
    /// Response engine type.
    #[serde(rename = "type", default)]
    pub engine_type: ResponseEngineType,
    /// The LLM whose test cases to list.
    #[validate(length(min = 1))]
    pub llm_id: String,
    /// LLM version. Latest when omitted.
    pub version: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseDefinitionOutput {
    pub test_case_definition_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_engine: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_variables: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_mocks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_modified_timestamp: Option<i64>,
}
