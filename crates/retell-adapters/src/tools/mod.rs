//! One adapter per Retell resource.
//!
//! Adapters are constructed once at startup and share the same clients.

pub mod agent;
pub mod call;
pub mod knowledge_base;
pub mod phone_number;
pub mod retell_llm;
pub mod test_case;
pub mod voice;

use std::sync::Arc;

use crate::client::{RetellClient, UndocumentedHttpClient};
use crate::traits::{Adapter, ToolDefinition};

pub use agent::AgentAdapter;
pub use call::CallAdapter;
pub use knowledge_base::KnowledgeBaseAdapter;
pub use phone_number::PhoneNumberAdapter;
pub use retell_llm::RetellLlmAdapter;
pub use test_case::TestCaseDefinitionAdapter;
pub use voice::VoiceAdapter;

/// Build every adapter, in catalog order.
///
/// `undocumented` is `None` when the bearer token or org id is not
/// configured; the test-case-definition tools are still registered and
/// report the missing credentials when called.
pub fn build_adapters(
    client: RetellClient,
    undocumented: Option<UndocumentedHttpClient>,
) -> Vec<Arc<dyn Adapter>> {
    vec![
        Arc::new(CallAdapter::new("calls", client.clone())),
        Arc::new(AgentAdapter::new("agents", client.clone())),
        Arc::new(PhoneNumberAdapter::new("phone_numbers", client.clone())),
        Arc::new(VoiceAdapter::new("voices", client.clone())),
        Arc::new(RetellLlmAdapter::new("retell_llms", client.clone())),
        Arc::new(KnowledgeBaseAdapter::new("knowledge_bases", client)),
        Arc::new(TestCaseDefinitionAdapter::new("test_case_definitions", undocumented)),
    ]
}

/// Every tool definition, without constructing any client.
pub fn tool_catalog() -> Vec<ToolDefinition> {
    [
        call::build_tool_definitions(),
        agent::build_tool_definitions(),
        phone_number::build_tool_definitions(),
        voice::build_tool_definitions(),
        retell_llm::build_tool_definitions(),
        knowledge_base::build_tool_definitions(),
        test_case::build_tool_definitions(),
    ]
    .concat()
}
