use serde_json::json;

use crate::config::ModelConfig;
use crate::cons::provider_cons::Provider;
use crate::host::http::HttpRequest;
use crate::llm::error::AiError;
use crate::llm::models::provider_base::{parse_json, text_at, u32_at, AiResponse, TokenUsage};
use crate::llm::prompts;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// The messages API has no system role here; the persona is prepended to
/// the user text with a blank line between.
pub fn build_chat_request(prompt: &str, config: &ModelConfig, api_key: &str) -> HttpRequest {
    let body = json!({
        "model": config.model,
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
        "messages": [
            { "role": "user", "content": format!("{}\n\n{}", prompts::PERSONA, prompt) }
        ]
    });

    HttpRequest::post(MESSAGES_URL)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .header("anthropic-version", API_VERSION)
        .json(body)
}

pub fn parse_chat_response(body: &str) -> Result<AiResponse, AiError> {
    let parsed = parse_json(Provider::Claude, body)?;
    let content = text_at(Provider::Claude, &parsed, "/content/0/text")?;
    Ok(AiResponse {
        content,
        usage: usage(&parsed),
    })
}

// input/output counts; the total is not reported and gets summed here.
// Usage is best-effort, so the sum saturates rather than panicking on
// boundary counts.
fn usage(value: &serde_json::Value) -> Option<TokenUsage> {
    let prompt_tokens = u32_at(value, "/usage/input_tokens")?;
    let completion_tokens = u32_at(value, "/usage/output_tokens")?;
    Some(TokenUsage {
        prompt_tokens,
        completion_tokens,
        total_tokens: prompt_tokens.saturating_add(completion_tokens),
    })
}
