use std::sync::atomic::Ordering;

use serde_json::json;

use crate::config::ModelConfig;
use crate::cons::provider_cons::Provider;
use crate::host::http::HttpMethod;
use crate::llm::error::AiError;
use crate::llm::prompts;
use crate::tests::support::{chat_completions_reply, claude_reply, gemini_reply, Harness};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_request_returns_the_reply_text() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_ok(&chat_completions_reply("the answer"));

        let reply = h.client().send_request("a question").await.unwrap();
        assert_eq!(reply, "the answer");

        let request = h.http.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://openrouter.ai/api/v1/chat/completions");
        let body = request.body.unwrap();
        assert_eq!(body["messages"][1]["content"], "a question");
        assert_eq!(body["model"], "anthropic/claude-3-sonnet-20240229");
    }

    #[tokio::test]
    async fn exactly_one_outbound_call_per_request() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_ok(&chat_completions_reply("ok"));

        h.client().send_request("hi").await.unwrap();
        assert_eq!(h.http.request_count(), 1);
    }

    #[tokio::test]
    async fn unsupported_provider_fails_before_credentials_or_network() {
        let h = Harness::new();
        h.set_setting("defaultProvider", json!("mistral"));
        h.prompt.push_input(Some("should never be consumed"));

        let err = h.client().send_request("hi").await.unwrap_err();
        assert!(matches!(err, AiError::UnsupportedProvider(ref id) if id == "mistral"));

        assert_eq!(h.http.request_count(), 0);
        assert_eq!(h.prompt.input_calls(), 0);
        assert_eq!(h.secrets.gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_fails_without_a_network_call() {
        let h = Harness::new();
        h.prompt.push_input(None);

        let err = h.client().send_request("hi").await.unwrap_err();
        assert!(matches!(err, AiError::MissingCredential(Provider::OpenRouter)));
        assert_eq!(h.http.request_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_carries_status_and_body() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_status(401, "Invalid key");

        let err = h.client().send_request("hi").await.unwrap_err();
        match err {
            AiError::Upstream {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, Provider::OpenRouter);
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid key");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
        // No retry on failure.
        assert_eq!(h.http.request_count(), 1);
    }

    #[tokio::test]
    async fn malformed_success_body_is_reported_as_such() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_ok(r#"{"unexpected": true}"#);

        let err = h.client().send_request("hi").await.unwrap_err();
        assert!(matches!(err, AiError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn claude_settings_route_to_the_messages_endpoint() {
        let h = Harness::new();
        h.set_setting("defaultProvider", json!("claude"));
        h.set_setting("defaultModel", json!("claude-3-haiku-20240307"));
        h.seed_api_key(Provider::Claude, "sk-ant-k");
        h.http.reply_ok(&claude_reply("claude says hi"));

        let reply = h.client().send_request("hello").await.unwrap();
        assert_eq!(reply, "claude says hi");

        let request = h.http.last_request();
        assert_eq!(request.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(request.header_value("anthropic-version"), Some("2023-06-01"));
        assert_eq!(request.header_value("Authorization"), Some("Bearer sk-ant-k"));
    }

    #[tokio::test]
    async fn gemini_settings_put_the_key_in_the_url() {
        let h = Harness::new();
        h.set_setting("defaultProvider", json!("gemini"));
        h.set_setting("defaultModel", json!("gemini-pro"));
        h.seed_api_key(Provider::Gemini, "AIzaSy-gemini-key-0123");
        h.http.reply_ok(&gemini_reply("gemini reply"));

        let reply = h.client().send_request("hello").await.unwrap();
        assert_eq!(reply, "gemini reply");

        let request = h.http.last_request();
        assert!(request.url.ends_with(":generateContent?key=AIzaSy-gemini-key-0123"));
        assert_eq!(request.header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn send_with_config_surfaces_token_usage() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenAI, "sk-k");
        h.http.reply_ok(
            r#"{"choices": [{"message": {"content": "ok"}}],
                "usage": {"prompt_tokens": 20, "completion_tokens": 8, "total_tokens": 28}}"#,
        );

        let config = ModelConfig {
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 1000,
            temperature: 0.1,
        };
        let response = h.client().send_with_config("hi", &config).await.unwrap();
        assert_eq!(response.content, "ok");
        assert_eq!(response.usage.unwrap().total_tokens, 28);
    }

    #[tokio::test]
    async fn configured_temperature_reaches_the_wire_unchanged() {
        let h = Harness::new();
        h.set_setting("temperature", json!(0.2));
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_ok(&chat_completions_reply("ok"));

        h.client().send_request("hi").await.unwrap();

        let body = h.http.last_request().body.unwrap();
        assert_eq!(body["temperature"], 0.2);
    }

    #[tokio::test]
    async fn connection_test_matches_the_ack_case_insensitively() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http
            .reply_ok(&chat_completions_reply("CONNECTION SUCCESSFUL - ready to go"));

        assert!(h.client().test_connection().await);

        let body = h.http.last_request().body.unwrap();
        assert_eq!(body["messages"][1]["content"], prompts::CONNECTION_TEST_PROMPT);
    }

    #[tokio::test]
    async fn connection_test_is_false_on_a_non_matching_reply() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_ok(&chat_completions_reply("Hello there!"));

        assert!(!h.client().test_connection().await);
    }

    #[tokio::test]
    async fn connection_test_swallows_errors() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_network_error("connection refused");

        assert!(!h.client().test_connection().await);
    }

    #[tokio::test]
    async fn model_listing_for_openrouter_returns_every_id() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_ok(
            r#"{"data": [{"id": "anthropic/claude-3-opus"}, {"id": "google/gemini-pro"}]}"#,
        );

        let models = h.client().get_available_models().await;
        assert_eq!(models, vec!["anthropic/claude-3-opus", "google/gemini-pro"]);

        let request = h.http.last_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://openrouter.ai/api/v1/models");
    }

    #[tokio::test]
    async fn model_listing_without_a_stored_key_is_empty_and_silent() {
        let h = Harness::new();
        h.prompt.push_input(Some("must not be consumed"));

        let models = h.client().get_available_models().await;
        assert!(models.is_empty());
        assert_eq!(h.http.request_count(), 0);
        assert_eq!(h.prompt.input_calls(), 0);
    }

    #[tokio::test]
    async fn model_listing_for_claude_skips_the_network() {
        let h = Harness::new();
        h.set_setting("defaultProvider", json!("claude"));
        h.seed_api_key(Provider::Claude, "sk-ant-k");

        let models = h.client().get_available_models().await;
        assert!(models.is_empty());
        assert_eq!(h.http.request_count(), 0);
    }

    #[tokio::test]
    async fn model_listing_failure_degrades_to_empty() {
        let h = Harness::new();
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-k");
        h.http.reply_status(503, "down for maintenance");

        let models = h.client().get_available_models().await;
        assert!(models.is_empty());
    }

    #[tokio::test]
    async fn listing_for_an_unknown_configured_provider_is_empty() {
        let h = Harness::new();
        h.set_setting("defaultProvider", json!("mistral"));

        let models = h.client().get_available_models().await;
        assert!(models.is_empty());
        assert_eq!(h.http.request_count(), 0);
    }
}
