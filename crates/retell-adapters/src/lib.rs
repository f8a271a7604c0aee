//! Retell AI adapters for the MCP server.
//!
//! Every Retell resource is served by an adapter implementing the
//! [`Adapter`] trait defined in [`traits`].  A tool call flows through
//! validation ([`schemas`]), an input transform ([`transform`]), an upstream
//! request ([`client`]) and an output transform before the result is handed
//! back to the server.

pub mod client;
pub mod config;
pub mod error;
pub mod schemas;
pub mod tools;
pub mod traits;
pub mod transform;

#[cfg(test)]
mod testing;

pub use client::{HttpTransport, RetellClient, Transport, UndocumentedHttpClient};
pub use config::{RetellConfig, UndocumentedCredentials};
pub use error::{AdapterError, Result};
pub use tools::{build_adapters, tool_catalog};
pub use traits::{Adapter, ResourceKind, ToolDefinition};
