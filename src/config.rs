use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cons::provider_cons::Provider;
use crate::host::{ConfigStore, EditorSurface, UserPrompt};

/// Store keys, shared with the host's settings schema.
pub mod keys {
    pub const DEFAULT_PROVIDER: &str = "defaultProvider";
    pub const DEFAULT_MODEL: &str = "defaultModel";
    pub const MAX_TOKENS: &str = "maxTokens";
    pub const TEMPERATURE: &str = "temperature";
    pub const SPARC_INTEGRATION: &str = "sparcIntegration";
    pub const AUTO_SUGGEST: &str = "autoSuggest";
    pub const REQUEST_TIMEOUT_SECS: &str = "requestTimeoutSecs";
}

/// Snapshot of what a request needs to know about the model. Taken once per
/// operation; concurrent settings edits affect the next call, not this one.
/// Temperature stays f64 end to end: the stores hold JSON numbers and the
/// providers receive JSON numbers, so a configured 0.2 goes out as 0.2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Baseline settings from the embedded Config.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultSettings {
    pub default_provider: String,
    pub default_model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub request_timeout_secs: u64,
    pub sparc_integration: bool,
    pub auto_suggest: bool,
    #[serde(default)]
    pub model_catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub provider: String,
    pub models: Vec<String>,
}

lazy_static! {
    static ref DEFAULTS: DefaultSettings = toml::from_str(include_str!("../Config.toml"))
        .expect("embedded Config.toml is well-formed");
}

pub(crate) fn defaults() -> &'static DefaultSettings {
    &DEFAULTS
}

/// Typed view over the host's configuration store, with baseline values
/// from the embedded Config.toml and the interactive provider/model pickers.
#[derive(Clone)]
pub struct ConfigurationManager {
    store: Arc<dyn ConfigStore>,
    prompt: Arc<dyn UserPrompt>,
    editor: Arc<dyn EditorSurface>,
}

impl ConfigurationManager {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        prompt: Arc<dyn UserPrompt>,
        editor: Arc<dyn EditorSurface>,
    ) -> Self {
        Self {
            store,
            prompt,
            editor,
        }
    }

    /// Reads a setting, falling back to `default` when the key is absent or
    /// holds a value of the wrong shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.store.get(key) {
            Some(value) => serde_json::from_value(value).unwrap_or(default),
            None => default,
        }
    }

    pub fn update<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        self.store.set(key, serde_json::to_value(value)?)
    }

    pub fn current_provider(&self) -> String {
        let configured: String = self.get(keys::DEFAULT_PROVIDER, defaults().default_provider.clone());
        if configured.is_empty() {
            defaults().default_provider.clone()
        } else {
            configured
        }
    }

    pub fn current_model(&self) -> String {
        let configured: String = self.get(keys::DEFAULT_MODEL, defaults().default_model.clone());
        if configured.is_empty() {
            defaults().default_model.clone()
        } else {
            configured
        }
    }

    /// Snapshot for one request, normalized so provider payloads never carry
    /// values the upstream APIs reject.
    pub fn model_config(&self) -> ModelConfig {
        let max_tokens: u32 = self.get(keys::MAX_TOKENS, defaults().max_tokens);
        let temperature: f64 = self.get(keys::TEMPERATURE, defaults().temperature);

        ModelConfig {
            provider: self.current_provider(),
            model: self.current_model(),
            max_tokens: if max_tokens == 0 { defaults().max_tokens } else { max_tokens },
            temperature: normalize_temperature(temperature),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        let secs: u64 = self.get(keys::REQUEST_TIMEOUT_SECS, defaults().request_timeout_secs);
        let secs = if secs == 0 { defaults().request_timeout_secs } else { secs };
        Duration::from_secs(secs)
    }

    pub fn is_sparc_integration_enabled(&self) -> bool {
        self.get(keys::SPARC_INTEGRATION, defaults().sparc_integration)
    }

    pub fn is_auto_suggest_enabled(&self) -> bool {
        self.get(keys::AUTO_SUGGEST, defaults().auto_suggest)
    }

    /// Curated models for a provider id, from the embedded catalog.
    pub fn models_for_provider(&self, provider_id: &str) -> Vec<String> {
        defaults()
            .model_catalog
            .iter()
            .find(|entry| entry.provider == provider_id)
            .map(|entry| entry.models.clone())
            .unwrap_or_default()
    }

    /// Provider picker. Selecting a provider also resets the model to the
    /// first catalog entry, so the pair stays consistent.
    pub fn switch_provider(&self) -> Result<()> {
        let providers: Vec<String> = Provider::ALL
            .iter()
            .map(|p| p.provider_name().to_string())
            .collect();
        let Some(selected) = self.prompt.pick(&providers, "Select AI provider") else {
            return Ok(());
        };

        self.store
            .set(keys::DEFAULT_PROVIDER, Value::String(selected.clone()))?;

        if let Some(model) = self.models_for_provider(&selected).first() {
            self.store
                .set(keys::DEFAULT_MODEL, Value::String(model.clone()))?;
            self.editor
                .show_info(&format!("Switched to {} with model {}", selected, model));
        }
        Ok(())
    }

    pub fn switch_model(&self) -> Result<()> {
        let provider = self.current_provider();
        let models = self.models_for_provider(&provider);
        if models.is_empty() {
            self.editor
                .show_warning(&format!("No models available for provider {}", provider));
            return Ok(());
        }

        let Some(selected) = self
            .prompt
            .pick(&models, &format!("Select model for {}", provider))
        else {
            return Ok(());
        };

        self.store
            .set(keys::DEFAULT_MODEL, Value::String(selected.clone()))?;
        self.editor
            .show_info(&format!("Switched to model {}", selected));
        Ok(())
    }

    /// Clears every Roo Code setting so the embedded defaults apply again.
    pub fn reset_to_defaults(&self) -> Result<()> {
        let all = [
            keys::DEFAULT_PROVIDER,
            keys::DEFAULT_MODEL,
            keys::MAX_TOKENS,
            keys::TEMPERATURE,
            keys::SPARC_INTEGRATION,
            keys::AUTO_SUGGEST,
            keys::REQUEST_TIMEOUT_SECS,
        ];
        for key in all {
            self.store.unset(key)?;
        }
        self.editor.show_info("Roo Code configuration reset to defaults");
        Ok(())
    }

    /// Opens the effective settings as a JSON document for backup.
    pub fn export_configuration(&self) -> Result<()> {
        let export = serde_json::json!({
            keys::DEFAULT_PROVIDER: self.current_provider(),
            keys::DEFAULT_MODEL: self.current_model(),
            keys::MAX_TOKENS: self.model_config().max_tokens,
            keys::TEMPERATURE: self.model_config().temperature,
            keys::SPARC_INTEGRATION: self.is_sparc_integration_enabled(),
            keys::AUTO_SUGGEST: self.is_auto_suggest_enabled(),
        });
        self.editor
            .open_document(&serde_json::to_string_pretty(&export)?, "json")?;
        self.editor
            .show_info("Configuration exported. Save this file to backup your settings.");
        Ok(())
    }
}

fn normalize_temperature(value: f64) -> f64 {
    if !value.is_finite() {
        return defaults().temperature;
    }
    value.clamp(0.0, 2.0)
}
