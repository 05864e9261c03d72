use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cons::provider_cons::Provider;
use crate::llm::error::AiError;

/// Uniform result every provider parser produces. Content is always
/// non-empty on success; usage is best-effort and absent when the provider
/// did not report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

pub(crate) fn parse_json(provider: Provider, body: &str) -> Result<Value, AiError> {
    serde_json::from_str(body)
        .map_err(|e| AiError::malformed(provider, format!("body is not valid JSON: {}", e)))
}

/// Extracts the string at a JSON pointer, treating a missing field or an
/// empty string as a malformed reply. Callers never want "" back.
pub(crate) fn text_at(provider: Provider, value: &Value, pointer: &str) -> Result<String, AiError> {
    let text = value
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| AiError::malformed(provider, format!("missing text at {}", pointer)))?;
    if text.is_empty() {
        return Err(AiError::malformed(provider, format!("empty text at {}", pointer)));
    }
    Ok(text.to_string())
}

pub(crate) fn u32_at(value: &Value, pointer: &str) -> Option<u32> {
    value.pointer(pointer)?.as_u64()?.try_into().ok()
}

/// Usage block shared by the chat-completions dialects (OpenRouter, OpenAI).
pub(crate) fn chat_completions_usage(value: &Value) -> Option<TokenUsage> {
    Some(TokenUsage {
        prompt_tokens: u32_at(value, "/usage/prompt_tokens")?,
        completion_tokens: u32_at(value, "/usage/completion_tokens")?,
        total_tokens: u32_at(value, "/usage/total_tokens")?,
    })
}

/// Model ids from a `{"data": [{"id": ...}, ...]}` listing. Entries without
/// an id are skipped rather than failing the whole listing.
pub(crate) fn model_ids(provider: Provider, value: &Value) -> Result<Vec<String>, AiError> {
    let items = value
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::malformed(provider, "missing data array in model listing"))?;
    Ok(items
        .iter()
        .filter_map(|m| m.get("id").and_then(Value::as_str).map(str::to_string))
        .collect())
}
