use serde_json::{Map, Value, json};

use super::{decode, decode_list};
use crate::error::Result;
use crate::schemas::test_case::{
    ListTestCaseDefinitionsInput, TestCaseDefinitionOutput, UpdateTestCaseDefinitionInput,
};

/// Query for the list endpoint, in `type`, `llm_id`, `version` order.
pub fn list_query(input: &ListTestCaseDefinitionsInput) -> Result<Map<String, Value>> {
    let mut query = Map::new();
    query.insert("type".into(), serde_json::to_value(input.engine_type)?);
    query.insert("llm_id".into(), json!(input.llm_id));
    if let Some(version) = input.version {
        query.insert("version".into(), json!(version));
    }
    Ok(query)
}

/// Split the definition id from the replacement body.
pub fn update_request(input: UpdateTestCaseDefinitionInput) -> Result<(String, Value)> {
    Ok((
        input.test_case_definition_id,
        serde_json::to_value(input.definition)?,
    ))
}

pub fn test_case_output(value: Value) -> Result<TestCaseDefinitionOutput> {
    decode("test_case_definition", value)
}

pub fn test_cases_output(value: Value) -> Result<Vec<TestCaseDefinitionOutput>> {
    decode_list("list_test_case_definitions", value)
}
