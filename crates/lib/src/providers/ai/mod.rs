pub mod gemini;
pub mod openai;

use crate::{errors::ProviderError, image::ImageData};
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::Client as ReqwestClient;
use std::fmt::Debug;
use std::time::Duration;

/// A single completion request: one system instruction and one user turn,
/// optionally carrying an image.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub image: Option<&'a ImageData>,
    pub max_tokens: u32,
}

impl<'a> CompletionRequest<'a> {
    /// A text-only request.
    pub fn text(system_prompt: &'a str, user_prompt: &'a str, max_tokens: u32) -> Self {
        Self {
            system_prompt,
            user_prompt,
            image: None,
            max_tokens,
        }
    }

    /// A request whose user turn pairs the prompt with an image.
    pub fn with_image(
        system_prompt: &'a str,
        user_prompt: &'a str,
        image: &'a ImageData,
        max_tokens: u32,
    ) -> Self {
        Self {
            system_prompt,
            user_prompt,
            image: Some(image),
            max_tokens,
        }
    }
}

/// A trait for interacting with a text/vision completion service.
///
/// Implementations must be safe to share between concurrently handled requests.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// A human-readable name used in error messages (e.g. "OpenAI").
    fn name(&self) -> &str;

    /// Generates a response for the given request, capped at `max_tokens`.
    async fn generate(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// Builds the HTTP client shared by the remote providers.
///
/// Without a timeout a call blocks until the remote service answers or fails.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<ReqwestClient, ProviderError> {
    let mut builder = ReqwestClient::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ProviderError::ReqwestClientBuild)
}
