use std::sync::atomic::Ordering;

use serde_json::{json, Value};

use crate::cons::provider_cons::Provider;
use crate::host::{ConfigStore, SecretStore};
use crate::tests::support::Harness;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_hit_skips_secret_store_and_prompt() {
        let h = Harness::new();
        h.set_setting("apiKey.openrouter", json!("sk-or-v1-settings"));

        let keys = h.keys();
        assert_eq!(
            keys.get_api_key(Provider::OpenRouter).as_deref(),
            Some("sk-or-v1-settings")
        );
        assert_eq!(h.secrets.gets.load(Ordering::SeqCst), 0);
        assert_eq!(h.prompt.input_calls(), 0);
    }

    #[test]
    fn secret_store_hit_skips_prompt() {
        let h = Harness::new();
        h.seed_api_key(Provider::Claude, "sk-ant-secret");

        let keys = h.keys();
        assert_eq!(
            keys.get_api_key(Provider::Claude).as_deref(),
            Some("sk-ant-secret")
        );
        assert_eq!(h.prompt.input_calls(), 0);
    }

    #[test]
    fn empty_settings_value_falls_through_to_secret_store() {
        let h = Harness::new();
        h.set_setting("apiKey.gemini", json!(""));
        h.seed_api_key(Provider::Gemini, "AIzaSy-from-secret-store");

        assert_eq!(
            h.keys().get_api_key(Provider::Gemini).as_deref(),
            Some("AIzaSy-from-secret-store")
        );
    }

    #[test]
    fn non_string_settings_value_falls_through() {
        let h = Harness::new();
        h.set_setting("apiKey.openai", json!(42));

        assert_eq!(h.keys().peek_api_key(Provider::OpenAI), None);
    }

    #[test]
    fn prompted_key_is_persisted_to_both_stores_before_return() {
        let h = Harness::new();
        h.prompt.push_input(Some("sk-or-v1-entered"));

        let resolved = h.keys().get_api_key(Provider::OpenRouter);
        assert_eq!(resolved.as_deref(), Some("sk-or-v1-entered"));

        assert_eq!(
            h.secrets.get("openrouter.apiKey").as_deref(),
            Some("sk-or-v1-entered")
        );
        assert_eq!(
            h.config.get("apiKey.openrouter"),
            Some(Value::String("sk-or-v1-entered".to_string()))
        );
    }

    #[test]
    fn prompt_is_masked_and_labeled_with_the_display_name() {
        let h = Harness::new();
        h.prompt.push_input(Some("sk-ant-x"));
        h.keys().get_api_key(Provider::Claude);

        let requests = h.prompt.input_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "Enter your Anthropic Claude API key");
        assert!(requests[0].masked);
        assert_eq!(
            requests[0].placeholder.as_deref(),
            Some("API key will be stored securely")
        );
    }

    #[test]
    fn dismissed_prompt_resolves_to_none_and_stores_nothing() {
        let h = Harness::new();
        h.prompt.push_input(None);

        assert_eq!(h.keys().get_api_key(Provider::OpenAI), None);
        assert_eq!(h.secrets.get("openai.apiKey"), None);
        assert_eq!(h.config.get("apiKey.openai"), None);
    }

    #[test]
    fn empty_input_counts_as_dismissal() {
        let h = Harness::new();
        h.prompt.push_input(Some(""));

        assert_eq!(h.keys().get_api_key(Provider::OpenAI), None);
        assert_eq!(h.secrets.get("openai.apiKey"), None);
    }

    #[test]
    fn second_resolution_after_prompt_reads_the_store() {
        let h = Harness::new();
        h.prompt.push_input(Some("sk-or-v1-once"));

        let keys = h.keys();
        assert!(keys.get_api_key(Provider::OpenRouter).is_some());
        assert!(keys.get_api_key(Provider::OpenRouter).is_some());
        assert_eq!(h.prompt.input_calls(), 1);
    }

    #[test]
    fn peek_never_prompts() {
        let h = Harness::new();
        h.prompt.push_input(Some("would-be-entered"));

        assert_eq!(h.keys().peek_api_key(Provider::OpenRouter), None);
        assert_eq!(h.prompt.input_calls(), 0);
    }

    #[test]
    fn remove_deletes_from_both_stores() {
        let h = Harness::new();
        h.set_setting("apiKey.openrouter", json!("sk-or-v1-x"));
        h.seed_api_key(Provider::OpenRouter, "sk-or-v1-x");

        let keys = h.keys();
        keys.remove_api_key(Provider::OpenRouter).unwrap();

        assert_eq!(h.config.get("apiKey.openrouter"), None);
        assert_eq!(h.secrets.get("openrouter.apiKey"), None);
        assert_eq!(keys.peek_api_key(Provider::OpenRouter), None);
    }

    #[test]
    fn configured_provider_listing_uses_stores_only() {
        let h = Harness::new();
        h.set_setting("apiKey.openrouter", json!("sk-or-v1-a"));
        h.seed_api_key(Provider::Gemini, "AIzaSy-configured-key-x");
        h.prompt.push_input(Some("never used"));

        let configured = h.keys().list_configured_providers();
        assert_eq!(configured, vec![Provider::OpenRouter, Provider::Gemini]);
        assert_eq!(h.prompt.input_calls(), 0);
    }
}
