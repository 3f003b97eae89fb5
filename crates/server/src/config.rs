//! # Application Configuration
//!
//! This module defines the configuration structure for `licensescan-server`
//! and loads it from an optional `config.yml` file layered under environment
//! variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use licensescan::providers::factory::ProviderSettings;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// The environment variable holding the completion service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
    /// Indicates a required value is missing.
    Missing(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::Missing(key) => write!(f, "{key} environment variable is not set"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// The interface to bind. Loaded from `HOST`.
    #[serde(default = "default_host")]
    pub host: String,
    /// The port for the server to listen on. Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of the persistent log file.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// The completion provider type ("openai" or "gemini").
    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,
    /// Endpoint override; derived from the provider when absent.
    #[serde(default)]
    pub ai_api_url: Option<String>,
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
    /// Provider credential. Takes precedence over `openai_api_key`.
    #[serde(default)]
    pub ai_api_key: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Output cap for each completion call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-call timeout. Unset means a call blocks until it resolves.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Largest accepted request body.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_dir() -> String {
    ".".to_string()
}

fn default_log_file() -> String {
    "licensescan.log".to_string()
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    licensescan::extractor::DEFAULT_MAX_TOKENS
}

fn default_body_limit_bytes() -> usize {
    20 * 1024 * 1024
}

impl AppConfig {
    /// The configured credential, if any non-empty one was provided.
    pub fn api_key(&self) -> Option<&str> {
        [self.ai_api_key.as_deref(), self.openai_api_key.as_deref()]
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty())
    }

    /// The settings used to build the completion provider.
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let api_key = self
            .api_key()
            .ok_or_else(|| ConfigError::Missing(API_KEY_VAR.to_string()))?;
        Ok(ProviderSettings {
            provider: self.ai_provider.clone(),
            api_url: self.ai_api_url.clone().filter(|url| !url.is_empty()),
            api_key: api_key.to_string(),
            model: self.ai_model.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_dir", &self.log_dir)
            .field("log_file", &self.log_file)
            .field("log_level", &self.log_level)
            .field("ai_provider", &self.ai_provider)
            .field("ai_api_url", &self.ai_api_url)
            .field("ai_model", &self.ai_model)
            .field("api_key_set", &self.api_key().is_some())
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Layer 1: serde defaults on `AppConfig`.
/// - Layer 2: `config.yml` in the working directory, or `config_path_override`
///   which must exist. `${VAR}` placeholders are substituted from the environment.
/// - Layer 3: plain environment variables (`PORT`, `OPENAI_API_KEY`, ...).
/// - Layer 4: `LICENSESCAN_...` prefixed variables.
///
/// Fails with [`ConfigError::Missing`] when no credential is configured.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = config_path_override.unwrap_or("config.yml");
    match read_and_substitute(config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path_override.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{config_path}'."
            )));
        }
        None => {}
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("LICENSESCAN")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if config.api_key().is_none() {
        return Err(ConfigError::Missing(API_KEY_VAR.to_string()));
    }

    Ok(config)
}
