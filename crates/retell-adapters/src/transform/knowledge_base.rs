use serde_json::Value;

use super::{decode, decode_list};
use crate::error::Result;
use crate::schemas::knowledge_base::{
    AddKnowledgeBaseSourceInput, CreateKnowledgeBaseInput, CreateKnowledgeBaseRequest,
    KnowledgeBaseOutput, KnowledgeBaseSourceRequest, KnowledgeBaseSourceType, KnowledgeBaseText,
};

/// Title given to text sources added without one.
pub const UNTITLED_SOURCE: &str = "Untitled";

pub fn create_knowledge_base_request(input: CreateKnowledgeBaseInput) -> CreateKnowledgeBaseRequest {
    CreateKnowledgeBaseRequest {
        knowledge_base_name: input.name,
        knowledge_base_texts: input.texts,
        knowledge_base_urls: input.urls,
        enable_auto_refresh: input.enable_auto_refresh,
    }
}

/// Split the knowledge base id from the source upload.
pub fn add_source_request(input: AddKnowledgeBaseSourceInput) -> (String, KnowledgeBaseSourceRequest) {
    let source = match input.source_type {
        KnowledgeBaseSourceType::Text => KnowledgeBaseSourceRequest::Text(KnowledgeBaseText {
            title: input.title.unwrap_or_else(|| UNTITLED_SOURCE.to_string()),
            text: input.content.unwrap_or_default(),
        }),
        KnowledgeBaseSourceType::Url => KnowledgeBaseSourceRequest::Url(input.url.unwrap_or_default()),
    };
    (input.knowledge_base_id, source)
}

pub fn knowledge_base_output(value: Value) -> Result<KnowledgeBaseOutput> {
    decode("knowledge_base", value)
}

pub fn knowledge_bases_output(value: Value) -> Result<Vec<KnowledgeBaseOutput>> {
    decode_list("list_knowledge_bases", value)
}
