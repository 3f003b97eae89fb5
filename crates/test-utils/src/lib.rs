use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use licensescan::errors::ProviderError;
use licensescan::providers::ai::{AiProvider, CompletionRequest};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// A scripted reply for [`MockAiProvider`].
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    /// Fails the call with `ProviderError::AiApi`.
    Failure(String),
    /// Panics inside the call.
    Panic(String),
}

/// One recorded call to the mock provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    /// The bare base64 image, when the call carried one.
    pub image: Option<String>,
    pub max_tokens: u32,
}

/// A provider that answers from a queue of scripted replies and records every call.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that returns the given texts in order.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for text in texts {
            provider.push_text(text);
        }
        provider
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push(MockReply::Text(text.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.push(MockReply::Failure(message.into()));
    }

    pub fn push_panic(&self, message: impl Into<String>) {
        self.push(MockReply::Panic(message.into()));
    }

    pub fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn generate(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: request.system_prompt.to_string(),
            user_prompt: request.user_prompt.to_string(),
            image: request.image.map(|image| image.base64().to_string()),
            max_tokens: request.max_tokens,
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Failure(message)) => Err(ProviderError::AiApi(message)),
            Some(MockReply::Panic(message)) => panic!("{message}"),
            None => Err(ProviderError::AiApi(
                "MockAiProvider: no reply scripted for this call".to_string(),
            )),
        }
    }
}

// --- Payload helpers ---

/// A tiny JPEG-looking payload (SOI + APP0 marker bytes), base64 encoded.
pub fn sample_image_base64() -> String {
    STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00])
}

/// Wraps a base64 payload in a `data:` URL with the given media type.
pub fn data_url(mime_type: &str, base64: &str) -> String {
    format!("data:{mime_type};base64,{base64}")
}

/// A typical structuring reply for a California license.
pub const SAMPLE_LICENSE_INFO: &str = "LIC#: D1234567\nName: Jane Doe\nDOB: 01/02/1990";

/// A typical raw text reply for a California license.
pub const SAMPLE_RAW_TEXT: &str =
    "CALIFORNIA DRIVER LICENSE\nDL D1234567\nJANE DOE\nDOB 01/02/1990\nCLASS C";
