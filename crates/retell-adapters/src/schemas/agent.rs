//! Agent shapes.
//!
//! The tuning parameters shared by create, update and the upstream body live
//! in [`AgentSettings`], which the input and request types flatten.

use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use super::llm::LlmSettings;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum VoiceModel {
    #[serde(rename = "eleven_turbo_v2")]
    ElevenTurboV2,
    #[serde(rename = "eleven_flash_v2")]
    ElevenFlashV2,
    #[serde(rename = "eleven_turbo_v2_5")]
    ElevenTurboV25,
    #[serde(rename = "eleven_flash_v2_5")]
    ElevenFlashV25,
    #[serde(rename = "eleven_multilingual_v2")]
    ElevenMultilingualV2,
    #[serde(rename = "Play3.0-mini")]
    Play30Mini,
    #[serde(rename = "PlayDialog")]
    PlayDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Language {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-IN")]
    EnIn,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "es-419")]
    Es419,
    #[serde(rename = "hi-IN")]
    HiIn,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "pt-PT")]
    PtPt,
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ru-RU")]
    RuRu,
    #[serde(rename = "it-IT")]
    ItIt,
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "nl-NL")]
    NlNl,
    #[serde(rename = "pl-PL")]
    PlPl,
    #[serde(rename = "multi")]
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AmbientSound {
    CoffeeShop,
    ConventionHall,
    SummerOutdoor,
    MountainOutdoor,
    StaticNoise,
    CallCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PostCallAnalysisModel {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SttMode {
    Fast,
    Accurate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeAlphabet {
    Ipa,
    Cmu,
}

// ---------------------------------------------------------------------------
// Nested types
// ---------------------------------------------------------------------------

/// Custom pronunciation for a word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PronunciationEntry {
    pub word: String,
    pub alphabet: PhonemeAlphabet,
    pub phoneme: String,
}

/// A value extracted from the transcript after the call ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisData {
    String {
        name: String,
        description: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        examples: Vec<String>,
    },
    Enum {
        name: String,
        description: String,
        choices: Vec<String>,
    },
    Boolean {
        name: String,
        description: String,
    },
    Number {
        name: String,
        description: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ResponseEngineType {
    #[default]
    #[serde(rename = "retell-llm")]
    RetellLlm,
}

/// Reference to an existing Retell LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResponseEngineRef {
    #[serde(rename = "type", default)]
    pub engine_type: ResponseEngineType,
    /// The ID of the Retell LLM.
    pub llm_id: String,
    /// LLM version. Latest when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl ResponseEngineRef {
    pub fn retell_llm(llm_id: impl Into<String>, version: Option<i64>) -> Self {
        Self {
            engine_type: ResponseEngineType::RetellLlm,
            llm_id: llm_id.into(),
            version,
        }
    }
}

/// Keys that mark a response engine as a reference rather than inline
/// settings.
const REFERENCE_KEYS: &[&str] = &["type", "llm_id", "version"];

/// Either a reference to an existing LLM or an inline LLM configuration
/// that is created (or applied to the agent's current LLM) first.
///
/// An object carrying `type`, `llm_id` or `version` must be a well-formed
/// reference; everything else must be well-formed inline settings.  Neither
/// form tolerates unknown keys, so a misspelt reference never turns into an
/// LLM create.
#[derive(Debug, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ResponseEngineInput {
    Reference(ResponseEngineRef),
    Inline(Box<LlmSettings>),
}

impl ResponseEngineInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Reference(_) => Ok(()),
            Self::Inline(settings) => settings.validate(),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseEngineInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(fields) = &value else {
            return Err(D::Error::custom(format!(
                "response_engine: expected an object, got {value}"
            )));
        };

        if REFERENCE_KEYS.iter().any(|key| fields.contains_key(*key)) {
            return ResponseEngineRef::deserialize(&value)
                .map(Self::Reference)
                .map_err(|e| D::Error::custom(format!("response_engine: {e}")));
        }

        match LlmSettings::deserialize(&value) {
            Ok(settings) => Ok(Self::Inline(Box::new(settings))),
            Err(e) => Err(D::Error::custom(inline_error(fields, e))),
        }
    }
}

/// Names the first inline key that fails on its own, since serde's message
/// for a bad enum value or type does not carry the field.
fn inline_error(fields: &Map<String, Value>, whole: serde_json::Error) -> String {
    for (key, field) in fields {
        let single = Value::Object(Map::from_iter([(key.clone(), field.clone())]));
        if let Err(e) = LlmSettings::deserialize(&single) {
            return format!("response_engine.{key}: {e}");
        }
    }
    format!("response_engine: {whole}")
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Agent tuning parameters.  Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct AgentSettings {
    /// Display name of the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    /// Voice model for ElevenLabs or PlayHT voices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_model: Option<VoiceModel>,
    /// Voices to fall back to when the primary provider is down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_voice_ids: Option<Vec<String>>,
    /// Voice stability (0-2). Lower is more stable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 2.0))]
    pub voice_temperature: Option<f64>,
    /// Speech rate (0.5-2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.5, max = 2.0))]
    pub voice_speed: Option<f64>,
    /// Output volume (0-2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 2.0))]
    pub volume: Option<f64>,
    /// How quickly the agent responds (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub responsiveness: Option<f64>,
    /// How easily the user can interrupt the agent (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub interruption_sensitivity: Option<f64>,
    /// Let the agent say "uh-huh" and similar while listening.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_backchannel: Option<bool>,
    /// How often to backchannel (0-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub backchannel_frequency: Option<f64>,
    /// Words used for backchanneling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backchannel_words: Option<Vec<String>>,
    /// Silence (ms) before the agent prompts the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_trigger_ms: Option<u64>,
    /// How many reminders to give before giving up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_max_count: Option<u32>,
    /// Background sound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_sound: Option<AmbientSound>,
    /// Background sound volume (0-2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 2.0))]
    pub ambient_sound_volume: Option<f64>,
    /// Speech recognition language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Receives call lifecycle events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub webhook_url: Option<String>,
    /// Keywords to bias transcription towards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boosted_keywords: Option<Vec<String>>,
    /// Format numbers and dates in transcripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_transcription_formatting: Option<bool>,
    /// Do not store transcripts or recordings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_out_sensitive_data_storage: Option<bool>,
    /// Return signed URLs for recordings and logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_in_signed_url: Option<bool>,
    /// Custom pronunciations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation_dictionary: Option<Vec<PronunciationEntry>>,
    /// Spell out numbers, dates and currency before synthesis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize_for_speech: Option<bool>,
    /// Hang up after this much user silence (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_call_after_silence_ms: Option<u64>,
    /// Hard cap on call length (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_call_duration_ms: Option<u64>,
    /// Detect voicemail on outbound calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_voicemail_detection: Option<bool>,
    /// Message to leave on voicemail. Hangs up when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voicemail_message: Option<String>,
    /// How long to run voicemail detection (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voicemail_detection_timeout_ms: Option<u64>,
    /// Values extracted from the transcript after the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_call_analysis_data: Option<Vec<AnalysisData>>,
    /// Model used for post-call analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_call_analysis_model: Option<PostCallAnalysisModel>,
    /// Delay before the agent speaks its begin message (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_message_delay_ms: Option<u64>,
    /// How long to ring before giving up on an outbound call (ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_duration_ms: Option<u64>,
    /// Speech recognition mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stt_mode: Option<SttMode>,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for `create_agent`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateAgentInput {
    /// The LLM driving the conversation: `{type: "retell-llm", llm_id, version?}`
    /// or an inline LLM configuration to create first.
    pub response_engine: ResponseEngineInput,
    /// The voice to use, e.g. `11labs-Adrian`.
    pub voice_id: String,
    #[serde(flatten)]
    pub settings: AgentSettings,
}

impl Validate for CreateAgentInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.settings.validate()?;
        self.response_engine.validate()
    }
}

/// Input for `update_agent`.  Only supplied fields are changed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateAgentInput {
    /// The ID of the agent to update.
    #[serde(rename = "agentId")]
    pub agent_id: String,
    /// New response engine, by reference or inline.
    pub response_engine: Option<ResponseEngineInput>,
    /// New voice.
    pub voice_id: Option<String>,
    #[serde(flatten)]
    pub settings: AgentSettings,
}

impl Validate for UpdateAgentInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.agent_id.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("agentId", validator::ValidationError::new("length"));
            return Err(errors);
        }
        self.settings.validate()?;
        match &self.response_engine {
            Some(engine) => engine.validate(),
            None => Ok(()),
        }
    }
}

/// Input for tools addressing a single agent.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct AgentIdInput {
    /// The ID of the agent.
    #[serde(rename = "agentId")]
    #[validate(length(min = 1))]
    pub agent_id: String,
}

/// Input for `publish_agent`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct PublishAgentInput {
    /// The ID of the agent to publish.
    #[serde(rename = "agentId")]
    #[validate(length(min = 1))]
    pub agent_id: String,
    /// Note describing what changed in this version.
    pub version_description: Option<String>,
}

// ---------------------------------------------------------------------------
// Upstream requests
// ---------------------------------------------------------------------------

/// Body for agent create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_engine: Option<ResponseEngineRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(flatten)]
    pub settings: AgentSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublishAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Optional fields of an upstream agent carried into tool output, after
/// `agent_id`.
pub const AGENT_OUTPUT_FIELDS: &[&str] = &[
    "version",
    "is_published",
    "response_engine",
    "voice_id",
    "agent_name",
    "voice_model",
    "fallback_voice_ids",
    "voice_temperature",
    "voice_speed",
    "volume",
    "responsiveness",
    "interruption_sensitivity",
    "enable_backchannel",
    "backchannel_frequency",
    "backchannel_words",
    "reminder_trigger_ms",
    "reminder_max_count",
    "ambient_sound",
    "ambient_sound_volume",
    "language",
    "webhook_url",
    "boosted_keywords",
    "enable_transcription_formatting",
    "opt_out_sensitive_data_storage",
    "opt_in_signed_url",
    "pronunciation_dictionary",
    "normalize_for_speech",
    "end_call_after_silence_ms",
    "max_call_duration_ms",
    "enable_voicemail_detection",
    "voicemail_message",
    "voicemail_detection_timeout_ms",
    "post_call_analysis_data",
    "post_call_analysis_model",
    "begin_message_delay_ms",
    "ring_duration_ms",
    "stt_mode",
    "last_modification_timestamp",
];
