//! # License Extraction
//!
//! Drives the two sequential completion calls for one request and turns
//! their outputs into an [`ExtractionOutcome`].

use crate::{
    errors::ProviderError,
    fields::parse_license_fields,
    image::ImageData,
    prompts::license::{
        field_structuring_user_prompt, is_no_license_reply, FIELD_STRUCTURING_SYSTEM_PROMPT,
        RAW_TEXT_FIELD, TEXT_EXTRACTION_SYSTEM_PROMPT, TEXT_EXTRACTION_USER_PROMPT,
    },
    providers::ai::{AiProvider, CompletionRequest},
    types::{
        ExtractionOutcome, ExtractionRequest, ExtractionStage, ExtractionSuccess, ProcessingTime,
    },
};
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// The default output cap for each completion call.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Extracts structured driver's license fields from an image.
pub struct LicenseExtractor {
    pub ai_provider: Box<dyn AiProvider>,
    max_tokens: u32,
}

impl fmt::Debug for LicenseExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseExtractor")
            .field("ai_provider", &self.ai_provider.name())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// A builder for creating `LicenseExtractor` instances.
pub struct LicenseExtractorBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    max_tokens: u32,
}

impl Default for LicenseExtractorBuilder {
    fn default() -> Self {
        Self {
            ai_provider: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl LicenseExtractorBuilder {
    /// Creates a new `LicenseExtractorBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use licensescan::LicenseExtractorBuilder;
    ///
    /// let builder = LicenseExtractorBuilder::new().max_tokens(300);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion provider used for both calls.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Sets the output token cap for each call.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builds the `LicenseExtractor`.
    pub fn build(self) -> Result<LicenseExtractor, ProviderError> {
        let ai_provider = self.ai_provider.ok_or(ProviderError::MissingAiProvider)?;
        Ok(LicenseExtractor {
            ai_provider,
            max_tokens: self.max_tokens,
        })
    }
}

impl LicenseExtractor {
    /// Handles a raw JSON request body end to end.
    ///
    /// The total time includes body validation.
    pub async fn process_body(&self, body: &[u8]) -> ExtractionOutcome {
        let started = Instant::now();
        match ExtractionRequest::from_json_body(body) {
            Ok(request) => self.run(&request, started).await,
            Err(message) => {
                error!("Rejected extraction request: {}", message);
                ExtractionOutcome::MalformedRequest(message)
            }
        }
    }

    /// Runs both extraction steps for an already validated request.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractionOutcome {
        self.run(request, Instant::now()).await
    }

    async fn run(&self, request: &ExtractionRequest, started: Instant) -> ExtractionOutcome {
        debug!("Received image data of length: {}", request.image.len());
        let image = ImageData::from_payload(&request.image);
        if image.base64().len() != request.image.len() {
            debug!("Image data contained a data URL prefix, removed it");
        }

        // --- Step 1: raw text extraction ---
        info!(
            "Sending image to {} for license detection and text extraction",
            self.ai_provider.name()
        );
        let extraction_started = Instant::now();
        let raw_text = match self.extract_text(&image).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error in text extraction: {}", e);
                return self.remote_error(ExtractionStage::TextExtraction, &e, None);
            }
        };
        let extraction = extraction_started.elapsed();
        debug!(
            "Text extraction completed in {:.2} seconds",
            extraction.as_secs_f64()
        );
        info!("Extracted text ({} characters)", raw_text.chars().count());
        debug!("Extracted text content: {}", raw_text);

        if is_no_license_reply(&raw_text) {
            if !request.force_extraction {
                warn!("No driver's license detected in the image");
                return ExtractionOutcome::NoLicense;
            }
            info!("No license detected, continuing because extraction was forced");
        }

        // --- Step 2: field structuring ---
        info!("Processing extracted text for license information");
        let structuring_started = Instant::now();
        let license_info = match self.structure_fields(&raw_text).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error in license info extraction: {}", e);
                return self.remote_error(ExtractionStage::FieldStructuring, &e, Some(raw_text));
            }
        };
        let structuring = structuring_started.elapsed();
        debug!(
            "License info extraction completed in {:.2} seconds",
            structuring.as_secs_f64()
        );
        info!(
            "License info extracted ({} characters)",
            license_info.chars().count()
        );
        debug!("License info content: {}", license_info);

        debug!("Parsing license info into structured format");
        let mut fields = parse_license_fields(&license_info);
        if fields.is_empty() {
            warn!("No structured license data found, using raw text");
            fields.insert(RAW_TEXT_FIELD, raw_text.as_str());
        }

        let total = started.elapsed();
        info!("Total processing completed in {:.2} seconds", total.as_secs_f64());
        info!("Returning {} fields of license data", fields.len());

        ExtractionOutcome::Success(ExtractionSuccess {
            fields,
            raw_text,
            license_info,
            processing_time: ProcessingTime {
                extraction,
                structuring,
                total,
            },
        })
    }

    /// Step 1: asks the model for the visible text of the license in `image`.
    pub async fn extract_text(&self, image: &ImageData) -> Result<String, ProviderError> {
        let request = CompletionRequest::with_image(
            TEXT_EXTRACTION_SYSTEM_PROMPT,
            TEXT_EXTRACTION_USER_PROMPT,
            image,
            self.max_tokens,
        );
        self.ai_provider.generate(&request).await
    }

    /// Step 2: asks the model to list the license fields found in `raw_text`.
    pub async fn structure_fields(&self, raw_text: &str) -> Result<String, ProviderError> {
        let user_prompt = field_structuring_user_prompt(raw_text);
        let request = CompletionRequest::text(
            FIELD_STRUCTURING_SYSTEM_PROMPT,
            &user_prompt,
            self.max_tokens,
        );
        self.ai_provider.generate(&request).await
    }

    fn remote_error(
        &self,
        stage: ExtractionStage,
        err: &ProviderError,
        raw_text: Option<String>,
    ) -> ExtractionOutcome {
        ExtractionOutcome::RemoteError {
            stage,
            message: format!("{} {} failed: {}", self.ai_provider.name(), stage, err),
            raw_text,
        }
    }
}
