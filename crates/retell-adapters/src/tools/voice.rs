//! Voice catalog tools (read-only).

use async_trait::async_trait;
use serde_json::Value;

use crate::client::RetellClient;
use crate::error::{AdapterError, Result};
use crate::schemas::voice::VoiceIdInput;
use crate::schemas::{NoParams, parse_params, tool_definition};
use crate::traits::{Adapter, ResourceKind, ToolDefinition};
use crate::transform::{require_found, to_value, voice as transform};

/// Adapter for the voice tools.
pub struct VoiceAdapter {
    id: String,
    client: RetellClient,
}

impl VoiceAdapter {
    pub fn new(id: impl Into<String>, client: RetellClient) -> Self {
        Self {
            id: id.into(),
            client,
        }
    }

    async fn tool_list_voices(&self, params: Value) -> Result<Value> {
        let _: NoParams = parse_params("list_voices", params)?;
        let voices = self.client.list_voices().await?;
        to_value(&transform::voices_output(voices)?)
    }

    async fn tool_get_voice(&self, params: Value) -> Result<Value> {
        let input: VoiceIdInput = parse_params("get_voice", params)?;
        let voice = self.client.get_voice(&input.voice_id).await?;
        let voice = require_found(voice, "Voice", &input.voice_id)?;
        to_value(&transform::voice_output(voice)?)
    }
}

/// Tool definitions exposed by [`VoiceAdapter`].
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool_definition::<NoParams>("list_voices", "Lists all available Retell voices"),
        tool_definition::<VoiceIdInput>("get_voice", "Gets details of a specific voice"),
    ]
}

#[async_trait]
impl Adapter for VoiceAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource(&self) -> ResourceKind {
        ResourceKind::Voice
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        build_tool_definitions()
    }

    async fn execute_tool(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            "list_voices" => self.tool_list_voices(params).await,
            "get_voice" => self.tool_get_voice(params).await,
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
    async fn get_voice_hits_encoded_path() {
        let transport = RecordingTransport::new();
        let adapter = VoiceAdapter::new("voices", transport.client());
        transport.respond(json!({
            "voice_id": "11labs-Adrian",
            "voice_name": "Adrian",
            "provider": "elevenlabs"
        }));
        let out = adapter
            .execute_tool("get_voice", json!({"voiceId": "11labs-Adrian"}))
            .await
            .unwrap();
        assert_eq!(out["voice_name"], "Adrian");
        assert_eq!(
            transport.calls(),
            [("GET".to_string(), "/get-voice/11labs-Adrian".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_voice_is_not_found() {
        let transport = RecordingTransport::new();
        let adapter = VoiceAdapter::new("voices", transport.client());
        transport.respond(json!(""));
        let err = adapter
            .execute_tool("get_voice", json!({"voiceId": "ghost"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Voice with ID ghost not found");
    }
}
