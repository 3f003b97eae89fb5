//! # AI Provider Factory
//!
//! Centralizes the creation of the configured completion provider so the
//! server (or any other consumer) never names a concrete provider type.

use crate::{
    errors::ProviderError,
    providers::ai::{
        gemini::{gemini_generate_url, GeminiProvider},
        openai::{OpenAiProvider, OPENAI_CHAT_COMPLETIONS_URL},
        AiProvider,
    },
};
use std::time::Duration;
use tracing::info;

/// Everything needed to instantiate a provider.
#[derive(Clone)]
pub struct ProviderSettings {
    /// The provider type, `"openai"` or `"gemini"`.
    pub provider: String,
    /// Optional endpoint override. Derived from the provider type when absent.
    pub api_url: Option<String>,
    pub api_key: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Creates an AI provider instance from its settings.
pub fn create_provider(settings: &ProviderSettings) -> Result<Box<dyn AiProvider>, ProviderError> {
    if settings.api_key.trim().is_empty() {
        return Err(ProviderError::MissingApiKey);
    }

    let provider: Box<dyn AiProvider> = match settings.provider.as_str() {
        "openai" => {
            let api_url = settings
                .api_url
                .clone()
                .unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
            info!(
                "Configuring OpenAI provider with URL: {} (model: {})",
                api_url, settings.model
            );
            Box::new(OpenAiProvider::new(
                api_url,
                settings.api_key.clone(),
                settings.model.clone(),
                settings.timeout,
            )?)
        }
        "gemini" => {
            let api_url = settings
                .api_url
                .clone()
                .unwrap_or_else(|| gemini_generate_url(&settings.model));
            info!("Configuring Gemini provider with URL: {}", api_url);
            Box::new(GeminiProvider::new(
                api_url,
                settings.api_key.clone(),
                settings.timeout,
            )?)
        }
        other => return Err(ProviderError::UnsupportedProvider(other.to_string())),
    };

    Ok(provider)
}
