//! Agent runtime: a hosted chat model driving the note tools in a loop.

pub mod agent;
pub mod openai;
pub mod types;

pub use agent::ToolLoopAgent;
pub use openai::OpenAiCompatClient;
pub use types::{AiError, AiResponse, ChatMessage};

use crate::tools::ToolDefinition;
use async_trait::async_trait;

/// A single chat-completion turn against some model provider
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError>;
}

/// Turns a user prompt into a final text answer, calling tools as needed
#[async_trait]
pub trait Agent: Send + Sync {
    fn model_name(&self) -> String;

    async fn run(&self, prompt: &str) -> Result<String, AiError>;
}
