use std::sync::Arc;

use crate::host::EditorSurface;
use crate::llm::client::AiClient;
use crate::llm::error::AiError;
use crate::llm::prompts;

/// Editor-facing operations. Each one builds its prompt, sends it, and
/// presents the result; failures are logged and shown to the user instead
/// of propagating, since these sit directly behind UI commands.
#[derive(Clone)]
pub struct CodeAssistant {
    client: AiClient,
    editor: Arc<dyn EditorSurface>,
}

impl CodeAssistant {
    pub fn new(client: AiClient, editor: Arc<dyn EditorSurface>) -> Self {
        Self { client, editor }
    }

    pub async fn explain_code(&self, code: &str) {
        let prompt = prompts::explain_prompt(code);
        match self.client.send_request(&prompt).await {
            Ok(response) => self.show_response(&response),
            Err(e) => self.report_error("Failed to explain code", &e),
        }
    }

    /// Generated code lands at the cursor; with no active editor it opens
    /// as a document instead.
    pub async fn generate_code(&self, request: &str) {
        let prompt = prompts::generate_prompt(request);
        match self.client.send_request(&prompt).await {
            Ok(response) => self.insert_code_at_cursor(&response),
            Err(e) => self.report_error("Failed to generate code", &e),
        }
    }

    pub async fn refactor_code(&self, code: &str, instructions: &str) {
        let prompt = prompts::refactor_prompt(code, instructions);
        match self.client.send_request(&prompt).await {
            Ok(response) => self.show_response(&response),
            Err(e) => self.report_error("Failed to refactor code", &e),
        }
    }

    pub async fn generate_tests(&self, code: &str) {
        let prompt = prompts::tests_prompt(code);
        match self.client.send_request(&prompt).await {
            Ok(response) => self.show_response(&response),
            Err(e) => self.report_error("Failed to generate tests", &e),
        }
    }

    /// Chat path: the message goes through unchanged. On failure the user
    /// sees the error notice and the chat gets a fixed apology line.
    pub async fn send_chat_message(&self, message: &str) -> String {
        match self.client.send_request(message).await {
            Ok(response) => response,
            Err(e) => {
                self.report_error("Failed to send chat message", &e);
                prompts::CHAT_FALLBACK_REPLY.to_string()
            }
        }
    }

    fn show_response(&self, content: &str) {
        if let Err(e) = self.editor.open_document(content, "markdown") {
            log::error!("Failed to open response document: {}", e);
        }
    }

    fn insert_code_at_cursor(&self, code: &str) {
        match self.editor.insert_at_cursor(code) {
            Ok(true) => {}
            Ok(false) => self.show_response(code),
            Err(e) => {
                log::error!("Failed to insert generated code: {}", e);
                self.show_response(code);
            }
        }
    }

    fn report_error(&self, message: &str, error: &AiError) {
        log::error!("{}: {}", message, error);
        self.editor.show_error(&format!("{}: {}", message, error));
    }

    pub fn client(&self) -> &AiClient {
        &self.client
    }
}
