//! MCP server for the Retell tool adapters.
//!
//! [`McpServer`] answers MCP JSON-RPC 2.0 messages against a set of
//! [`retell_adapters::Adapter`]s; [`transport`] runs it over line-delimited
//! streams such as stdin/stdout.

pub mod error;
pub mod mcp;
pub mod transport;

pub use error::{McpError, Result};
pub use mcp::{JsonRpcRequest, JsonRpcResponse, McpServer, McpToolResult};
pub use transport::{serve, serve_stdio};
