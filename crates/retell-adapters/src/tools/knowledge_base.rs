//! Knowledge base tools.
//!
//! Creation and source uploads go upstream as multipart forms; everything
//! else is plain JSON.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::client::RetellClient;
use crate::error::{AdapterError, Result};
use crate::schemas::knowledge_base::{
    AddKnowledgeBaseSourceInput, CreateKnowledgeBaseInput, DeleteKnowledgeBaseSourceInput,
    KnowledgeBaseIdInput,
};
use crate::schemas::{NoParams, deleted, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::{knowledge_base as transform, require_found, to_value};

/// Adapter for the knowledge base tools.
pub struct KnowledgeBaseAdapter {
    id: String,
    client: RetellClient,
}

impl KnowledgeBaseAdapter {
    pub fn new(id: impl Into<String>, client: RetellClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    async fn tool_list_knowledge_bases(&self, params: Value) -> Result<Value> {
        let _: NoParams = parse_params("list_knowledge_bases", params)?;
        let bases = self.client.list_knowledge_bases().await?;
        to_value(&transform::knowledge_bases_output(bases)?)
    }

    async fn tool_create_knowledge_base(&self, params: Value) -> Result<Value> {
        let input: CreateKnowledgeBaseInput = parse_params("create_knowledge_base", params)?;
        let request = transform::create_knowledge_base_request(input);
        info!(name = %request.knowledge_base_name, "creating knowledge base");
        let base = self.client.create_knowledge_base(&request).await?;
        to_value(&transform::knowledge_base_output(base)?)
    }

    async fn tool_get_knowledge_base(&self, params: Value) -> Result<Value> {
        let input: KnowledgeBaseIdInput = parse_params("get_knowledge_base", params)?;
        let base = self
            .client
            .get_knowledge_base(&input.knowledge_base_id)
            .await?;
        let base = require_found(base, "Knowledge base", &input.knowledge_base_id)?;
        to_value(&transform::knowledge_base_output(base)?)
    }

    async fn tool_delete_knowledge_base(&self, params: Value) -> Result<Value> {
        let input: KnowledgeBaseIdInput = parse_params("delete_knowledge_base", params)?;
        self.client
            .delete_knowledge_base(&input.knowledge_base_id)
            .await?;
        Ok(deleted("Knowledge base", &input.knowledge_base_id))
    }

    async fn tool_add_knowledge_base_source(&self, params: Value) -> Result<Value> {
        let input: AddKnowledgeBaseSourceInput =
            parse_params("add_knowledge_base_source", params)?;
        let (knowledge_base_id, source) = transform::add_source_request(input);
        let base = self
            .client
            .add_knowledge_base_source(&knowledge_base_id, &source)
            .await?;
        to_value(&transform::knowledge_base_output(base)?)
    }

    async fn tool_delete_knowledge_base_source(&self, params: Value) -> Result<Value> {
        let input: DeleteKnowledgeBaseSourceInput =
            parse_params("delete_knowledge_base_source", params)?;
        let base = self
            .client
            .delete_knowledge_base_source(&input.knowledge_base_id, &input.source_id)
            .await?;
        to_value(&transform::knowledge_base_output(base)?)
    }
}

/// Tool definitions exposed by [`KnowledgeBaseAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<NoParams>("list_knowledge_bases", "Lists all knowledge bases"),
        tool_definition::<CreateKnowledgeBaseInput>(
            "create_knowledge_base",
            "Creates a knowledge base from text documents and URLs",
        ),
        tool_definition::<KnowledgeBaseIdInput>(
            "get_knowledge_base",
            "Gets a knowledge base and its sources",
        ),
        tool_definition::<KnowledgeBaseIdInput>(
            "delete_knowledge_base",
            "Deletes a knowledge base",
        ),
        tool_definition::<AddKnowledgeBaseSourceInput>(
            "add_knowledge_base_source",
            "Adds a text or URL source to a knowledge base",
        ),
        tool_definition::<DeleteKnowledgeBaseSourceInput>(
            "delete_knowledge_base_source",
            "Removes a source from a knowledge base",
        ),
    ]
}

#[async_trait]
impl Adapter for KnowledgeBaseAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::KnowledgeBase
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "list_knowledge_bases" => self.tool_list_knowledge_bases(params).await,
            "create_knowledge_base" => self.tool_create_knowledge_base(params).await,
            "get_knowledge_base" => self.tool_get_knowledge_base(params).await,
            "delete_knowledge_base" => self.tool_delete_knowledge_base(params).await,
            "add_knowledge_base_source" => self.tool_add_knowledge_base_source(params).await,
            "delete_knowledge_base_source" => {
                self.tool_delete_knowledge_base_source(params).await
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
    use crate::client::RequestBody;
    use crate::testing::RecordingTransport;
    use serde_json::json;

    #[tokio::test]
    async fn create_uploads_form_fields() {
        let transport = RecordingTransport::new();
        let adapter = KnowledgeBaseAdapter::new("kb", transport.client());
        transport.respond(json!({
            "knowledge_base_id": "kb_1",
            "knowledge_base_name": "Docs",
            "status": "in_progress"
        }));

        let out = adapter
            .execute_tool(
                "create_knowledge_base",
                json!({"name": "Docs", "urls": ["https://example.com"]}),
            )
            .await
            .unwrap();
        assert_eq!(out["name"], "Docs");
        assert_eq!(out["status"], "in_progress");

        let request = &transport.requests()[0];
        assert_eq!(request.path, "/create-knowledge-base");
        assert_eq!(
            request.body,
            RequestBody::Form(vec![
                ("knowledge_base_name".into(), "Docs".into()),
                ("knowledge_base_urls".into(), r#"["https://example.com"]"#.into()),
            ])
        );
    }

    #[tokio::test]
    async fn text_source_without_content_is_rejected() {
        let transport = RecordingTransport::new();
        let adapter = KnowledgeBaseAdapter::new("kb", transport.client());
        let err = adapter
            .execute_tool(
                "add_knowledge_base_source",
                json!({"knowledgeBaseId": "kb_1", "sourceType": "text"}),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("content is required"), "{err}");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn delete_source_addresses_both_ids() {
        let transport = RecordingTransport::new();
        let adapter = KnowledgeBaseAdapter::new("kb", transport.client());
        transport.respond(json!({"knowledge_base_id": "kb_1", "knowledge_base_sources": []}));
        let out = adapter
            .execute_tool(
                "delete_knowledge_base_source",
                json!({"knowledgeBaseId": "kb_1", "sourceId": "src 9"}),
            )
            .await
            .unwrap();
        assert_eq!(out["sources"], json!([]));
        assert_eq!(
            transport.calls(),
            [(
                "DELETE".to_string(),
                "/delete-knowledge-base-source/kb_1/source/src%209".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn get_missing_knowledge_base() {
        let transport = RecordingTransport::new();
        let adapter = KnowledgeBaseAdapter::new("kb", transport.client());
        transport.respond(json!({}));
        let err = adapter
            .execute_tool("get_knowledge_base", json!({"knowledgeBaseId": "kb_x"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Knowledge base with ID kb_x not found");
    }
}
