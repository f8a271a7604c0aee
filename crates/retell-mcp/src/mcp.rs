//! MCP (Model Context Protocol) server implementation.
//!
//! Implements the MCP JSON-RPC 2.0 protocol, exposing every registered Retell
//! adapter as MCP tools.  Supports the `initialize`, `tools/list`,
//! `tools/call`, and `ping` methods; `notifications/*` messages are accepted
//! silently.
//!
//! The MCP specification version targeted is `2024-11-05`.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, warn};

use retell_adapters::{Adapter, ResourceKind};

// ---------------------------------------------------------------------------
// MCP protocol version
// ---------------------------------------------------------------------------

/// The MCP protocol version this server implements.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// The server name reported during initialization.
pub const SERVER_NAME: &str = "retell-mcp";

/// The server version reported during initialization.
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// JSON-RPC types
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Must be `"2.0"`.
    pub jsonrpc: String,
    /// Request identifier.  Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    /// The method to invoke.
    pub method: String,
    /// Method parameters (defaults to `null` if absent).
    #[serde(default)]
    pub params: Value,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Echoed from the request.
    pub id: Option<Value>,
    /// Present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

impl JsonRpcResponse {
    /// Construct a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Construct an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MCP-specific types
// ---------------------------------------------------------------------------

/// An MCP tool definition returned by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The result of an MCP `tools/call` invocation.
///
/// Failures are reported in-band as `Error: <message>` text, so a result
/// never carries an error flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    pub content: Vec<McpContent>,
}

/// A single content block within an MCP tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpContent {
    /// The content type (always `"text"`).
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl McpContent {
    /// Create a text content block.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: "text".into(),
            text: value.into(),
        }
    }
}

impl McpToolResult {
    /// A result holding a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::text(text)],
        }
    }
}

/// Render a tool outcome as a single text block.
///
/// Strings pass through unchanged, other values are serialized as compact
/// JSON, and errors become `Error: <message>`.
pub fn render_outcome<E: Display>(outcome: Result<Value, E>) -> McpToolResult {
    match outcome {
        Ok(Value::String(text)) => McpToolResult::text(text),
        Ok(other) => McpToolResult::text(other.to_string()),
        Err(e) => McpToolResult::text(format!("Error: {e}")),
    }
}

// ---------------------------------------------------------------------------
// McpServer
// ---------------------------------------------------------------------------

/// MCP protocol server that exposes adapters as tools.
pub struct McpServer {
    tools: Vec<McpToolDefinition>,
    routes: HashMap<String, Arc<dyn Adapter>>,
}

impl McpServer {
    /// Create a new MCP server backed by the given adapters.
    ///
    /// Tool names are resolved once here.  If two adapters declare the same
    /// name, the first one keeps it.
    pub fn new(adapters: Vec<Arc<dyn Adapter>>) -> Self {
        let mut tools = Vec::new();
        let mut routes: HashMap<String, Arc<dyn Adapter>> = HashMap::new();

        for adapter in adapters {
            for tool in adapter.tools() {
                if routes.contains_key(&tool.name) {
                    warn!(tool = %tool.name, adapter = adapter.id(), "duplicate tool name ignored");
                    continue;
                }
                routes.insert(tool.name.clone(), Arc::clone(&adapter));
                tools.push(McpToolDefinition {
                    name: tool.name,
                    description: tool.description,
                    input_schema: tool.parameters,
                });
            }
        }

        Self { tools, routes }
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// The resource family of the adapter that owns `tool`.
    pub fn tool_resource(&self, tool: &str) -> Option<ResourceKind> {
        self.routes.get(tool).map(|adapter| adapter.resource())
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns `None` for notifications, which must not be answered.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparsable JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("failed to parse JSON-RPC message: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned().filter(|id| !id.is_null());
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("invalid JSON-RPC request: {e}"),
            )),
        }
    }

    /// Handle a single JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "MCP request received");

        if request.id.is_none() && request.method.starts_with("notifications/") {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            other => {
                warn!(method = %other, "unknown MCP method");
                JsonRpcResponse::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    format!("method not found: {other}"),
                )
            }
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        match serde_json::to_value(&self.tools) {
            Ok(tools) => JsonRpcResponse::success(id, json!({ "tools": tools })),
            Err(e) => {
                error!(error = %e, "failed to serialize tool list");
                JsonRpcResponse::error(id, INTERNAL_ERROR, "failed to serialize tool list")
            }
        }
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                "missing required field `name` in params",
            );
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let result = self.call_tool(name, arguments).await;
        match serde_json::to_value(&result) {
            Ok(v) => JsonRpcResponse::success(id, v),
            Err(e) => {
                error!(error = %e, "failed to serialize tool result");
                JsonRpcResponse::error(id, INTERNAL_ERROR, "failed to serialize tool result")
            }
        }
    }

    /// Execute a tool and render the outcome.  Never fails: errors are
    /// logged and returned as text.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpToolResult {
        let started = Instant::now();
        let outcome = match self.routes.get(name) {
            Some(adapter) => adapter
                .execute_tool(name, arguments)
                .await
                .map_err(|e| e.to_string()),
            None => Err(format!("unknown tool: {name}")),
        };

        match (&outcome, self.tool_resource(name)) {
            (Ok(_), _) => debug!(
                tool = %name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "tool call succeeded"
            ),
            (Err(message), Some(resource)) => {
                error!(tool = %name, resource = %resource, error = %message, "tool call failed")
            }
            (Err(message), None) => error!(tool = %name, error = %message, "tool call failed"),
        }
        render_outcome(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
