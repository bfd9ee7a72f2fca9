//! Role-tagged chat messages sent to the completion endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a QC and architect.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// The three-message conversation: instructions, question, then the
/// extracted document text in the assistant slot.
pub fn build_conversation(
    system_message: &str,
    question: String,
    documents_content: String,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, system_message),
        ChatMessage::new(Role::User, question),
        ChatMessage::new(Role::Assistant, documents_content),
    ]
}
