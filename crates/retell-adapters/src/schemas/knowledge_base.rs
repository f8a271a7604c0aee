//! Knowledge base shapes.
//!
//! Creation and source upload are multipart uploads upstream; the request
//! types here render themselves into ordered form fields.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_urls;
use crate::error::Result;

/// A text document to index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeBaseText {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeBaseSourceType {
    Text,
    Url,
}

/// Input for `create_knowledge_base`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateKnowledgeBaseInput {
    /// Name of the knowledge base (at most 40 characters).
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    /// Text documents to index.
    pub texts: Option<Vec<KnowledgeBaseText>>,
    /// Web pages to scrape and index.
    #[validate(custom(function = "validate_urls"))]
    pub urls: Option<Vec<String>>,
    /// Re-scrape URLs every 12 hours.
    pub enable_auto_refresh: Option<bool>,
}

/// Input for tools addressing a single knowledge base.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseIdInput {
    /// The ID of the knowledge base.
    #[validate(length(min = 1))]
    pub knowledge_base_id: String,
}

/// Input for `add_knowledge_base_source`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_source"))]
pub struct AddKnowledgeBaseSourceInput {
    /// The ID of the knowledge base.
    #[validate(length(min = 1))]
    pub knowledge_base_id: String,
    /// Kind of source to add.
    pub source_type: KnowledgeBaseSourceType,
    /// Title of a text source.
    pub title: Option<String>,
    /// Body of a text source. Required when `sourceType` is `text`.
    pub content: Option<String>,
    /// Address of a URL source. Required when `sourceType` is `url`.
    #[validate(url)]
    pub url: Option<String>,
}

fn validate_source(input: &AddKnowledgeBaseSourceInput) -> std::result::Result<(), ValidationError> {
    let missing = match input.source_type {
        KnowledgeBaseSourceType::Text if input.content.as_deref().is_none_or(str::is_empty) => {
            Some("content is required for text sources")
        }
        KnowledgeBaseSourceType::Url if input.url.as_deref().is_none_or(str::is_empty) => {
            Some("url is required for url sources")
        }
        _ => None,
    };
    match missing {
        Some(message) => {
            let mut err = ValidationError::new("source");
            err.message = Some(message.into());
            Err(err)
        }
        None => Ok(()),
    }
}

/// Input for `delete_knowledge_base_source`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKnowledgeBaseSourceInput {
    /// The ID of the knowledge base.
    #[validate(length(min = 1))]
    pub knowledge_base_id: String,
    /// The ID of the source to remove.
    #[validate(length(min = 1))]
    pub source_id: String,
}

// ---------------------------------------------------------------------------
// Upstream requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateKnowledgeBaseRequest {
    pub knowledge_base_name: String,
    pub knowledge_base_texts: Option<Vec<KnowledgeBaseText>>,
    pub knowledge_base_urls: Option<Vec<String>>,
    pub enable_auto_refresh: Option<bool>,
}

impl CreateKnowledgeBaseRequest {
    /// Render as multipart text fields.  Arrays are sent as JSON strings.
    pub fn form_fields(&self) -> Result<Vec<(String, String)>> {
        let mut fields = vec![(
            "knowledge_base_name".to_string(),
            self.knowledge_base_name.clone(),
        )];
        if let Some(texts) = &self.knowledge_base_texts {
            fields.push(("knowledge_base_texts".into(), serde_json::to_string(texts)?));
        }
        if let Some(urls) = &self.knowledge_base_urls {
            fields.push(("knowledge_base_urls".into(), serde_json::to_string(urls)?));
        }
        if let Some(refresh) = self.enable_auto_refresh {
            fields.push(("enable_auto_refresh".into(), refresh.to_string()));
        }
        Ok(fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeBaseSourceRequest {
    Text(KnowledgeBaseText),
    Url(String),
}

impl KnowledgeBaseSourceRequest {
    pub fn form_fields(&self) -> Result<Vec<(String, String)>> {
        Ok(match self {
            Self::Text(text) => vec![(
                "knowledge_base_texts".into(),
                serde_json::to_string(std::slice::from_ref(text))?,
            )],
            Self::Url(url) => vec![(
                "knowledge_base_urls".into(),
                serde_json::to_string(std::slice::from_ref(url))?,
            )],
        })
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseSourceOutput {
    pub source_id: String,
    #[serde(alias = "type")]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseOutput {
    pub knowledge_base_id: String,
    #[serde(default, alias = "knowledge_base_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, alias = "knowledge_base_sources", skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<KnowledgeBaseSourceOutput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_auto_refresh: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_refreshed_timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_params;
    use serde_json::json;

    #[test]
    fn name_longer_than_forty_chars_is_rejected() {
        let err = parse_params::<CreateKnowledgeBaseInput>(
            "create_knowledge_base",
            json!({"name": "x".repeat(41)}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("name"), "{err}");
    }

    #[test]
    fn text_source_needs_content() {
        let err = parse_params::<AddKnowledgeBaseSourceInput>(
            "add_knowledge_base_source",
            json!({"knowledgeBaseId": "kb_1", "sourceType": "text", "title": "FAQ"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("content is required"), "{err}");
    }

    #[test]
    fn url_source_needs_url() {
        let err = parse_params::<AddKnowledgeBaseSourceInput>(
            "add_knowledge_base_source",
            json!({"knowledgeBaseId": "kb_1", "sourceType": "url"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("url is required"), "{err}");
    }

    #[test]
    fn create_form_fields_encode_arrays_as_json() {
        let request = CreateKnowledgeBaseRequest {
            knowledge_base_name: "Docs".into(),
            knowledge_base_texts: Some(vec![KnowledgeBaseText {
                title: "FAQ".into(),
                text: "Open 9-5".into(),
            }]),
            knowledge_base_urls: None,
            enable_auto_refresh: Some(true),
        };
        assert_eq!(
            request.form_fields().unwrap(),
            vec![
                ("knowledge_base_name".to_string(), "Docs".to_string()),
                (
                    "knowledge_base_texts".to_string(),
                    r#"[{"title":"FAQ","text":"Open 9-5"}]"#.to_string()
                ),
                ("enable_auto_refresh".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn output_renames_upstream_fields() {
        let output: KnowledgeBaseOutput = serde_json::from_value(json!({
            "knowledge_base_id": "kb_1",
            "knowledge_base_name": "Docs",
            "status": "in_progress",
            "knowledge_base_sources": [{"source_id": "s1", "type": "url", "url": "https://a.b"}],
            "unknown": 1
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "knowledge_base_id": "kb_1",
                "name": "Docs",
                "status": "in_progress",
                "sources": [{"source_id": "s1", "source_type": "url", "url": "https://a.b"}]
            })
        );
    }
}
