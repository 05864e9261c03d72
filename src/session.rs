use serde::{Deserialize, Serialize};

use crate::assistant::CodeAssistant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Ordered transcript behind the chat surface. Each user message gets
/// exactly one assistant reply appended, even when the request fails (the
/// fallback line keeps the turn structure intact).
pub struct ChatSession {
    assistant: CodeAssistant,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(assistant: CodeAssistant) -> Self {
        Self {
            assistant,
            history: Vec::new(),
        }
    }

    pub async fn handle_user_message(&mut self, message: &str) -> String {
        self.history.push(ChatMessage {
            role: Role::User,
            content: message.to_string(),
        });

        let reply = self.assistant.send_chat_message(message).await;
        self.history.push(ChatMessage {
            role: Role::Assistant,
            content: reply.clone(),
        });
        reply
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}
