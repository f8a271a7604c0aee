//! Typed wrapper over the documented Retell REST API.

use std::sync::Arc;

use serde_json::Value;

use super::{ApiRequest, HttpTransport, Transport, encode_segment};
use crate::config::RetellConfig;
use crate::error::Result;
use crate::schemas::agent::{AgentRequest, PublishAgentRequest};
use crate::schemas::call::{
    CreateBatchCallRequest, CreatePhoneCallRequest, CreateWebCallRequest, ListCallsRequest,
    UpdateCallRequest,
};
use crate::schemas::knowledge_base::{CreateKnowledgeBaseRequest, KnowledgeBaseSourceRequest};
use crate::schemas::llm::LlmSettings;
use crate::schemas::phone_number::{CreatePhoneNumberRequest, UpdatePhoneNumberRequest};

/// Client for the documented API.  Cheap to clone.
#[derive(Clone)]
pub struct RetellClient {
    transport: Arc<dyn Transport>,
}

impl RetellClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build an HTTPS client from resolved configuration.
    pub fn from_config(config: &RetellConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(
            config.base_url.clone(),
            config.api_key.clone(),
        )))
    }

    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.transport.send(request).await
    }

    // -- Calls ---------------------------------------------------------------

    pub async fn create_phone_call(&self, body: &CreatePhoneCallRequest) -> Result<Value> {
        self.send(ApiRequest::post("/v2/create-phone-call").json(body)?)
            .await
    }

    pub async fn create_web_call(&self, body: &CreateWebCallRequest) -> Result<Value> {
        self.send(ApiRequest::post("/v2/create-web-call").json(body)?)
            .await
    }

    pub async fn get_call(&self, call_id: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!("/v2/get-call/{}", encode_segment(call_id))))
            .await
    }

    pub async fn list_calls(&self, body: &ListCallsRequest) -> Result<Value> {
        self.send(ApiRequest::post("/v2/list-calls").json(body)?).await
    }

    pub async fn update_call(&self, call_id: &str, body: &UpdateCallRequest) -> Result<Value> {
        let path = format!("/v2/update-call/{}", encode_segment(call_id));
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete_call(&self, call_id: &str) -> Result<Value> {
        self.send(ApiRequest::delete(format!(
            "/v2/delete-call/{}",
            encode_segment(call_id)
        )))
        .await
    }

    pub async fn create_batch_call(&self, body: &CreateBatchCallRequest) -> Result<Value> {
        self.send(ApiRequest::post("/create-batch-call").json(body)?)
            .await
    }

    // -- Agents --------------------------------------------------------------

    pub async fn list_agents(&self) -> Result<Value> {
        self.send(ApiRequest::get("/list-agents")).await
    }

    pub async fn create_agent(&self, body: &AgentRequest) -> Result<Value> {
        self.send(ApiRequest::post("/create-agent").json(body)?).await
    }

    pub async fn get_agent(&self, agent_id: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!("/get-agent/{}", encode_segment(agent_id))))
            .await
    }

    pub async fn update_agent(&self, agent_id: &str, body: &AgentRequest) -> Result<Value> {
        let path = format!("/update-agent/{}", encode_segment(agent_id));
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete_agent(&self, agent_id: &str) -> Result<Value> {
        self.send(ApiRequest::delete(format!(
            "/delete-agent/{}",
            encode_segment(agent_id)
        )))
        .await
    }

    pub async fn get_agent_versions(&self, agent_id: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!(
            "/get-agent-versions/{}",
            encode_segment(agent_id)
        )))
        .await
    }

    pub async fn publish_agent(&self, agent_id: &str, body: &PublishAgentRequest) -> Result<Value> {
        let path = format!("/publish-agent/{}", encode_segment(agent_id));
        self.send(ApiRequest::post(path).json(body)?).await
    }

    // -- Phone numbers -------------------------------------------------------

    pub async fn list_phone_numbers(&self) -> Result<Value> {
        self.send(ApiRequest::get("/list-phone-numbers")).await
    }

    pub async fn create_phone_number(&self, body: &CreatePhoneNumberRequest) -> Result<Value> {
        self.send(ApiRequest::post("/create-phone-number").json(body)?)
            .await
    }

    pub async fn get_phone_number(&self, number: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!(
            "/get-phone-number/{}",
            encode_segment(number)
        )))
        .await
    }

    pub async fn update_phone_number(
        &self,
        number: &str,
        body: &UpdatePhoneNumberRequest,
    ) -> Result<Value> {
        let path = format!("/update-phone-number/{}", encode_segment(number));
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete_phone_number(&self, number: &str) -> Result<Value> {
        self.send(ApiRequest::delete(format!(
            "/delete-phone-number/{}",
            encode_segment(number)
        )))
        .await
    }

    // -- Voices --------------------------------------------------------------

    pub async fn list_voices(&self) -> Result<Value> {
        self.send(ApiRequest::get("/list-voices")).await
    }

    pub async fn get_voice(&self, voice_id: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!("/get-voice/{}", encode_segment(voice_id))))
            .await
    }

    // -- Retell LLMs ---------------------------------------------------------

    pub async fn list_retell_llms(&self) -> Result<Value> {
        self.send(ApiRequest::get("/list-retell-llms")).await
    }

    pub async fn create_retell_llm(&self, body: &LlmSettings) -> Result<Value> {
        self.send(ApiRequest::post("/create-retell-llm").json(body)?)
            .await
    }

    pub async fn get_retell_llm(&self, llm_id: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!(
            "/get-retell-llm/{}",
            encode_segment(llm_id)
        )))
        .await
    }

    pub async fn update_retell_llm(&self, llm_id: &str, body: &LlmSettings) -> Result<Value> {
        let path = format!("/update-retell-llm/{}", encode_segment(llm_id));
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete_retell_llm(&self, llm_id: &str) -> Result<Value> {
        self.send(ApiRequest::delete(format!(
            "/delete-retell-llm/{}",
            encode_segment(llm_id)
        )))
        .await
    }

    // -- Knowledge bases -----------------------------------------------------

    pub async fn list_knowledge_bases(&self) -> Result<Value> {
        self.send(ApiRequest::get("/list-knowledge-bases")).await
    }

    pub async fn create_knowledge_base(&self, body: &CreateKnowledgeBaseRequest) -> Result<Value> {
        self.send(ApiRequest::post("/create-knowledge-base").form(body.form_fields()?))
            .await
    }

    pub async fn get_knowledge_base(&self, knowledge_base_id: &str) -> Result<Value> {
        self.send(ApiRequest::get(format!(
            "/get-knowledge-base/{}",
            encode_segment(knowledge_base_id)
        )))
        .await
    }

    pub async fn delete_knowledge_base(&self, knowledge_base_id: &str) -> Result<Value> {
        self.send(ApiRequest::delete(format!(
            "/delete-knowledge-base/{}",
            encode_segment(knowledge_base_id)
        )))
        .await
    }

    pub async fn add_knowledge_base_source(
        &self,
        knowledge_base_id: &str,
        source: &KnowledgeBaseSourceRequest,
    ) -> Result<Value> {
        let path = format!(
            "/add-knowledge-base-sources/{}",
            encode_segment(knowledge_base_id)
        );
        self.send(ApiRequest::post(path).form(source.form_fields()?))
            .await
    }

    pub async fn delete_knowledge_base_source(
        &self,
        knowledge_base_id: &str,
        source_id: &str,
    ) -> Result<Value> {
        self.send(ApiRequest::delete(format!(
            "/delete-knowledge-base-source/{}/source/{}",
            encode_segment(knowledge_base_id),
            encode_segment(source_id)
        )))
        .await
    }
}
