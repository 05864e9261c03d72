use serde_json::json;

use crate::config::ModelConfig;
use crate::cons::provider_cons::Provider;
use crate::host::http::HttpRequest;
use crate::llm::error::AiError;
use crate::llm::models::provider_base::{
    chat_completions_usage, model_ids, parse_json, text_at, AiResponse,
};
use crate::llm::prompts;

const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODELS_URL: &str = "https://api.openai.com/v1/models";

pub fn build_chat_request(prompt: &str, config: &ModelConfig, api_key: &str) -> HttpRequest {
    let body = json!({
        "model": config.model,
        "messages": [
            { "role": "system", "content": prompts::PERSONA },
            { "role": "user", "content": prompt }
        ],
        "max_tokens": config.max_tokens,
        "temperature": config.temperature
    });

    HttpRequest::post(CHAT_URL)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(body)
}

pub fn parse_chat_response(body: &str) -> Result<AiResponse, AiError> {
    let parsed = parse_json(Provider::OpenAI, body)?;
    let content = text_at(Provider::OpenAI, &parsed, "/choices/0/message/content")?;
    Ok(AiResponse {
        content,
        usage: chat_completions_usage(&parsed),
    })
}

pub fn build_models_request(api_key: &str) -> HttpRequest {
    HttpRequest::get(MODELS_URL).header("Authorization", format!("Bearer {}", api_key))
}

/// The raw listing mixes chat models with embeddings, audio and the rest;
/// only ids containing "gpt" are kept.
pub fn parse_models_response(body: &str) -> Result<Vec<String>, AiError> {
    let parsed = parse_json(Provider::OpenAI, body)?;
    let models = model_ids(Provider::OpenAI, &parsed)?;
    Ok(models.into_iter().filter(|id| id.contains("gpt")).collect())
}
