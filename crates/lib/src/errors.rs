use thiserror::Error;

/// Errors raised while talking to a remote completion service.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned no completion text")]
    EmptyCompletion,
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("AI provider is not configured")]
    MissingAiProvider,
}
