use serde_json::json;

use crate::config::ModelConfig;
use crate::cons::provider_cons::Provider;
use crate::host::http::HttpRequest;
use crate::llm::error::AiError;
use crate::llm::models::provider_base::{parse_json, text_at, u32_at, AiResponse, TokenUsage};
use crate::llm::prompts;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini authenticates with the key as a URL query parameter, not a
/// header, and takes a single text part with the persona prepended.
pub fn build_chat_request(prompt: &str, config: &ModelConfig, api_key: &str) -> HttpRequest {
    let url = format!("{}/{}:generateContent?key={}", BASE_URL, config.model, api_key);
    let body = json!({
        "contents": [
            { "parts": [ { "text": format!("{}\n\n{}", prompts::PERSONA, prompt) } ] }
        ],
        "generationConfig": {
            "temperature": config.temperature,
            "maxOutputTokens": config.max_tokens
        }
    });

    HttpRequest::post(url)
        .header("Content-Type", "application/json")
        .json(body)
}

pub fn parse_chat_response(body: &str) -> Result<AiResponse, AiError> {
    let parsed = parse_json(Provider::Gemini, body)?;
    let content = text_at(Provider::Gemini, &parsed, "/candidates/0/content/parts/0/text")?;
    Ok(AiResponse {
        content,
        usage: usage(&parsed),
    })
}

fn usage(value: &serde_json::Value) -> Option<TokenUsage> {
    Some(TokenUsage {
        prompt_tokens: u32_at(value, "/usageMetadata/promptTokenCount")?,
        completion_tokens: u32_at(value, "/usageMetadata/candidatesTokenCount")?,
        total_tokens: u32_at(value, "/usageMetadata/totalTokenCount")?,
    })
}
