//! Backend seams: who answers questions and who knows the tools

use crate::transcript::AgentMessage;
use crate::types::ToolDescriptor;
use crate::Result;
use async_trait::async_trait;

/// Something that can answer a free-text question
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Human-readable description of the model in use, e.g. `Ollama (qwen2.5)`
    fn model_name(&self) -> String;

    /// Run the agent on one question and return the full message trace,
    /// starting with the user's question
    async fn run(&self, question: &str) -> Result<Vec<AgentMessage>>;
}

/// Something that can enumerate the tools available to the agent
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// List the tools in the order the source publishes them
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>>;
}
