//! Core adapter trait and supporting types.
//!
//! Every Retell resource (calls, agents, phone numbers, etc.) is served by a
//! type implementing the [`Adapter`] trait, giving the MCP server a uniform
//! interface to discover and invoke tools.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// The upstream resource family an adapter manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Phone, web and batch calls.
    Call,
    /// Voice agents.
    Agent,
    /// Provisioned phone numbers.
    PhoneNumber,
    /// Read-only voice catalog.
    Voice,
    /// Retell LLM response engines.
    RetellLlm,
    /// Knowledge bases and their sources.
    KnowledgeBase,
    /// Simulation test-case definitions (undocumented API).
    TestCaseDefinition,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Agent => write!(f, "agent"),
            Self::PhoneNumber => write!(f, "phone_number"),
            Self::Voice => write!(f, "voice"),
            Self::RetellLlm => write!(f, "retell_llm"),
            Self::KnowledgeBase => write!(f, "knowledge_base"),
            Self::TestCaseDefinition => write!(f, "test_case_definition"),
        }
    }
}

/// A tool exposed by an adapter that the agent can invoke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Machine-readable tool name (e.g. `create_phone_call`).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    pub parameters: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Core trait
// ---------------------------------------------------------------------------

/// The universal adapter interface.
///
/// The MCP server discovers available tools via [`Adapter::tools`] and
/// executes them via [`Adapter::execute_tool`].  Implementations hold only
/// immutable client handles, so one instance serves concurrent calls.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Return the unique identifier for this adapter instance.
    fn id(&self) -> &str;

    /// Return the resource family this adapter manages.
    fn resource(&self) -> ResourceKind;

    /// Return the list of tools this adapter exposes.
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Execute a named tool with the given JSON parameters.
    ///
    /// Parameters are validated before any upstream request is made.
    /// Returns a JSON value representing the tool's output.
    async fn execute_tool(
        &self,
        name: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value>;
}
