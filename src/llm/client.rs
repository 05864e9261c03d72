use std::sync::Arc;

use anyhow::Result;

use crate::config::{ConfigurationManager, ModelConfig};
use crate::cons::provider_cons::Provider;
use crate::host::http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::llm::error::AiError;
use crate::llm::keys::ApiKeyManager;
use crate::llm::models::provider_base::AiResponse;
use crate::llm::models::provider_handle;
use crate::llm::prompts;

/// Request dispatcher: resolves the provider and credential, performs
/// exactly one outbound call, and maps the reply into [`AiResponse`].
/// Stateless between calls; settings and credentials are re-read each time.
#[derive(Clone)]
pub struct AiClient {
    keys: ApiKeyManager,
    settings: ConfigurationManager,
    http: Arc<dyn HttpClient>,
}

impl AiClient {
    pub fn new(
        keys: ApiKeyManager,
        settings: ConfigurationManager,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            keys,
            settings,
            http,
        }
    }

    /// Production wiring: a reqwest client with the configured timeout.
    pub fn with_default_http(keys: ApiKeyManager, settings: ConfigurationManager) -> Result<Self> {
        let http = ReqwestHttpClient::new(settings.request_timeout())?;
        Ok(Self::new(keys, settings, Arc::new(http)))
    }

    /// Sends one prompt under the current settings snapshot and returns the
    /// reply text.
    pub async fn send_request(&self, prompt: &str) -> Result<String, AiError> {
        let config = self.settings.model_config();
        let response = self.send_with_config(prompt, &config).await?;
        Ok(response.content)
    }

    /// Same as [`send_request`](Self::send_request) but with an explicit
    /// config, returning the full response including token usage.
    ///
    /// The provider id is parsed before the credential is resolved: an
    /// unsupported id fails without reading a store or prompting.
    pub async fn send_with_config(
        &self,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<AiResponse, AiError> {
        let provider = Provider::from_name(&config.provider)
            .ok_or_else(|| AiError::UnsupportedProvider(config.provider.clone()))?;
        let api_key = self
            .keys
            .get_api_key(provider)
            .ok_or(AiError::MissingCredential(provider))?;

        let request = provider_handle::chat_request(provider, prompt, config, &api_key);
        let response = self.execute(provider, request).await?;
        let parsed = provider_handle::parse_chat_response(provider, &response.body)?;

        if let Some(usage) = &parsed.usage {
            log::debug!(
                "{} request used {} prompt + {} completion tokens",
                provider,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }
        Ok(parsed)
    }

    async fn execute(
        &self,
        provider: Provider,
        request: HttpRequest,
    ) -> Result<HttpResponse, AiError> {
        log::debug!("Sending {} request", provider);
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            log::error!(
                "{} API error ({}): {}",
                provider.display_name(),
                response.status,
                response.body
            );
            return Err(AiError::Upstream {
                provider,
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    /// Sends the canned probe and checks for the acknowledgment phrase.
    /// Never propagates a failure; any error is logged and reported as false.
    pub async fn test_connection(&self) -> bool {
        match self.send_request(prompts::CONNECTION_TEST_PROMPT).await {
            Ok(reply) => reply.to_lowercase().contains(prompts::CONNECTION_ACK),
            Err(e) => {
                log::error!("Connection test failed: {}", e);
                false
            }
        }
    }

    /// Models for the currently configured provider. Uses the non-prompting
    /// credential peek; with no stored key the listing is empty rather than
    /// a dialog. Failures are logged and yield an empty listing.
    pub async fn get_available_models(&self) -> Vec<String> {
        let provider_id = self.settings.current_provider();
        let Some(provider) = Provider::from_name(&provider_id) else {
            log::warn!("Cannot list models for unknown provider: {}", provider_id);
            return Vec::new();
        };
        let Some(api_key) = self.keys.peek_api_key(provider) else {
            return Vec::new();
        };

        match self.list_available_models(provider, &api_key).await {
            Ok(models) => models,
            Err(e) => {
                log::error!("Failed to fetch available models: {}", e);
                Vec::new()
            }
        }
    }

    /// Listing for one provider. Only OpenRouter and OpenAI have an endpoint
    /// wired; the rest return an empty listing without a network call.
    pub async fn list_available_models(
        &self,
        provider: Provider,
        api_key: &str,
    ) -> Result<Vec<String>, AiError> {
        let Some(request) = provider_handle::models_request(provider, api_key) else {
            return Ok(Vec::new());
        };
        let response = self.execute(provider, request).await?;
        provider_handle::parse_models_response(provider, &response.body)
    }

    pub fn keys(&self) -> &ApiKeyManager {
        &self.keys
    }

    pub fn settings(&self) -> &ConfigurationManager {
        &self.settings
    }
}
