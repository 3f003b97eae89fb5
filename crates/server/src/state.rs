//! # Application State
//!
//! The shared, immutable state handed to every request handler. It is built
//! once at startup; the completion credential lives inside the provider and is
//! never read from the environment while serving requests.

use crate::config::AppConfig;
use licensescan::{providers::factory::create_provider, LicenseExtractor, LicenseExtractorBuilder};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The extractor wrapping the configured completion provider.
    pub extractor: Arc<LicenseExtractor>,
}

impl AppState {
    /// Builds a state around an already constructed extractor.
    pub fn new(config: AppConfig, extractor: LicenseExtractor) -> Self {
        Self {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
        }
    }
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let settings = config.provider_settings()?;
    let ai_provider = create_provider(&settings)?;
    info!("{} client initialized", ai_provider.name());

    let extractor = LicenseExtractorBuilder::new()
        .ai_provider(ai_provider)
        .max_tokens(config.max_tokens)
        .build()?;

    Ok(AppState::new(config, extractor))
}
