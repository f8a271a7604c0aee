//! Adapter error types.
//!
//! All adapter subsystems surface errors through [`AdapterError`].  Each
//! variant carries enough context for callers to decide how to handle the
//! failure without inspecting opaque strings.  The MCP layer renders every
//! variant through its `Display` impl, so messages are written to be read by
//! the calling agent.

use serde_json::Value;

/// Unified error type for the Retell adapters.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A required configuration value is absent or malformed.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The requested tool does not exist on this adapter.
    #[error("tool not found: `{tool_name}` on adapter `{adapter_id}`")]
    ToolNotFound {
        adapter_id: String,
        tool_name: String,
    },

    /// The parameters supplied to a tool failed schema validation.
    #[error("invalid parameters for tool `{tool_name}`: {reason}")]
    InvalidParams { tool_name: String, reason: String },

    /// The upstream API answered with a non-success status.
    ///
    /// `payload` is the parsed JSON error body, or `{"message": <raw text>}`
    /// when the body was not JSON.
    #[error("{status} {message}")]
    Api {
        status: u16,
        message: String,
        payload: Value,
    },

    /// The request never produced an HTTP response.
    #[error("request to `{url}` failed: {reason}")]
    Http { url: String, reason: String },

    /// A get-by-id returned an empty body.
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// The upstream body did not have the expected shape.
    #[error("unexpected response from `{operation}`: {reason}")]
    UnexpectedResponse { operation: String, reason: String },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AdapterError {
    /// Build an [`AdapterError::Api`] from a status code and a parsed error
    /// payload, lifting the upstream `message` field when there is one.
    pub fn api(status: u16, reason: Option<&str>, payload: Value) -> Self {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .or_else(|| reason.map(str::to_owned))
            .unwrap_or_else(|| payload.to_string());
        Self::Api {
            status,
            message,
            payload,
        }
    }

    /// The HTTP status attached to this error, if it came from upstream.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The structured error payload attached to this error, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the adapters crate.
pub type Result<T> = std::result::Result<T, AdapterError>;
