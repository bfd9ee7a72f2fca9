//! Chat-completion client port definition.

use tracing::info;

use crate::domain::{AppError, ChatMessage};

/// One chat-completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Model identifier passed through to the endpoint.
    pub model: String,
    /// Ordered, role-tagged conversation.
    pub messages: Vec<ChatMessage>,
}

/// Port for chat-completion operations.
pub trait CompletionClient {
    /// Send the conversation and return the first choice's message text.
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}

/// Factory for creating a completion client on demand.
pub trait CompletionClientFactory {
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError>;
}

/// Mock client for dry runs without API calls.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient;

impl CompletionClient for MockCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        info!(model = %request.model, "mock mode: skipping completion call");
        for message in &request.messages {
            info!(role = message.role.as_str(), chars = message.content.len(), "mock message");
        }

        Ok(format!(
            "[mock] {} messages for model {} were not sent.",
            request.messages.len(),
            request.model
        ))
    }
}

impl CompletionClientFactory for MockCompletionClient {
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError> {
        Ok(Box::new(MockCompletionClient))
    }
}
