use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::cons::provider_cons::Provider;
use crate::host::{ConfigStore, InputRequest, SecretStore, UserPrompt};

fn config_key(provider: Provider) -> String {
    format!("apiKey.{}", provider.provider_name())
}

fn secret_key(provider: Provider) -> String {
    format!("{}.apiKey", provider.provider_name())
}

/// Resolves provider credentials: settings first, then the secret store,
/// then a masked prompt. Nothing is cached here; every call re-reads the
/// stores so external changes take effect immediately.
#[derive(Clone)]
pub struct ApiKeyManager {
    config: Arc<dyn ConfigStore>,
    secrets: Arc<dyn SecretStore>,
    prompt: Arc<dyn UserPrompt>,
}

impl ApiKeyManager {
    pub fn new(
        config: Arc<dyn ConfigStore>,
        secrets: Arc<dyn SecretStore>,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        Self {
            config,
            secrets,
            prompt,
        }
    }

    /// Full resolution, prompting as a last resort. A freshly entered key is
    /// persisted to both stores before it is returned. `None` means no
    /// credential is available, which callers treat as a state, not an error.
    pub fn get_api_key(&self, provider: Provider) -> Option<String> {
        if let Some(api_key) = self.peek_api_key(provider) {
            return Some(api_key);
        }

        let entered = self.prompt.input(&InputRequest {
            prompt: format!("Enter your {} API key", provider.display_name()),
            masked: true,
            placeholder: Some("API key will be stored securely".to_string()),
        })?;
        if entered.is_empty() {
            return None;
        }

        self.store_api_key(provider, &entered);
        Some(entered)
    }

    /// Store-only lookup. Never prompts, so enumeration paths (configured
    /// providers, model listings) cannot block on a dialog.
    pub fn peek_api_key(&self, provider: Provider) -> Option<String> {
        if let Some(value) = self.config.get(&config_key(provider)) {
            if let Some(api_key) = value.as_str() {
                if !api_key.is_empty() {
                    return Some(api_key.to_string());
                }
            }
        }
        self.secrets
            .get(&secret_key(provider))
            .filter(|api_key| !api_key.is_empty())
    }

    fn store_api_key(&self, provider: Provider, api_key: &str) {
        if let Err(e) = self.secrets.set(&secret_key(provider), api_key) {
            log::warn!("Failed to store {} API key in secret store: {}", provider, e);
        }
        if let Err(e) = self
            .config
            .set(&config_key(provider), Value::String(api_key.to_string()))
        {
            log::warn!("Failed to store {} API key in settings: {}", provider, e);
        }
    }

    /// Deletes the credential from both stores. Both deletions are attempted
    /// even if the first fails.
    pub fn remove_api_key(&self, provider: Provider) -> Result<()> {
        let secret = self.secrets.delete(&secret_key(provider));
        let config = self.config.unset(&config_key(provider));
        secret.and(config)
    }

    /// Shallow syntactic check. Advisory only: a passing key can still be
    /// rejected upstream, and requests are never gated on this.
    pub fn validate_api_key(provider: Provider, api_key: &str) -> bool {
        if api_key.trim().is_empty() {
            return false;
        }
        match provider {
            Provider::OpenRouter => api_key.starts_with("sk-or-"),
            Provider::OpenAI => api_key.starts_with("sk-"),
            Provider::Claude => api_key.starts_with("sk-ant-"),
            Provider::Gemini => api_key.len() > 20,
        }
    }

    /// Providers with a stored credential, in [`Provider::ALL`] order.
    pub fn list_configured_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|provider| self.peek_api_key(*provider).is_some())
            .collect()
    }
}
