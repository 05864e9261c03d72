//! Maps a [`Provider`] to its wire implementation. Every match here is
//! exhaustive, so adding a provider variant will not compile until its
//! builder and parser exist.

use crate::config::ModelConfig;
use crate::cons::provider_cons::Provider;
use crate::host::http::HttpRequest;
use crate::llm::error::AiError;
use crate::llm::models::provider_base::AiResponse;

use super::{claude, gemini, openai, openrouter};

pub fn chat_request(
    provider: Provider,
    prompt: &str,
    config: &ModelConfig,
    api_key: &str,
) -> HttpRequest {
    match provider {
        Provider::OpenRouter => openrouter::build_chat_request(prompt, config, api_key),
        Provider::Claude => claude::build_chat_request(prompt, config, api_key),
        Provider::OpenAI => openai::build_chat_request(prompt, config, api_key),
        Provider::Gemini => gemini::build_chat_request(prompt, config, api_key),
    }
}

pub fn parse_chat_response(provider: Provider, body: &str) -> Result<AiResponse, AiError> {
    match provider {
        Provider::OpenRouter => openrouter::parse_chat_response(body),
        Provider::Claude => claude::parse_chat_response(body),
        Provider::OpenAI => openai::parse_chat_response(body),
        Provider::Gemini => gemini::parse_chat_response(body),
    }
}

/// `None` means the provider has no listing endpoint wired; callers report
/// an empty catalog without touching the network.
pub fn models_request(provider: Provider, api_key: &str) -> Option<HttpRequest> {
    match provider {
        Provider::OpenRouter => Some(openrouter::build_models_request(api_key)),
        Provider::OpenAI => Some(openai::build_models_request(api_key)),
        Provider::Claude | Provider::Gemini => None,
    }
}

pub fn parse_models_response(provider: Provider, body: &str) -> Result<Vec<String>, AiError> {
    match provider {
        Provider::OpenRouter => openrouter::parse_models_response(body),
        Provider::OpenAI => openai::parse_models_response(body),
        Provider::Claude | Provider::Gemini => Ok(Vec::new()),
    }
}
