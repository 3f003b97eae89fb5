use crate::fields::LicenseFields;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Message returned when the body is missing, unparseable or empty.
pub const NO_JSON_MESSAGE: &str = "No JSON data provided";
/// Message returned when the body has no `image` key.
pub const NO_IMAGE_MESSAGE: &str = "No image data provided";
/// Message returned when `image` is present but not a string.
pub const IMAGE_NOT_STRING_MESSAGE: &str = "Image data must be a base64 string";

/// An inbound extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Base64 image, optionally prefixed with a `data:image/...;base64,` marker.
    pub image: String,
    pub force_extraction: bool,
}

impl ExtractionRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            force_extraction: false,
        }
    }

    pub fn force_extraction(mut self, force: bool) -> Self {
        self.force_extraction = force;
        self
    }

    /// Validates a raw HTTP body and builds a request from it.
    ///
    /// The error is the client-facing message. `force_extraction` follows JSON
    /// truthiness, so `1` or `"yes"` enable it and `0`, `""` or `null` do not.
    pub fn from_json_body(body: &[u8]) -> Result<Self, String> {
        let data: Value = match serde_json::from_slice(body) {
            Ok(value) if is_truthy(&value) => value,
            _ => return Err(NO_JSON_MESSAGE.to_string()),
        };

        let Some(object) = data.as_object() else {
            return Err(NO_IMAGE_MESSAGE.to_string());
        };
        tracing::debug!(
            "Request data keys: {:?}",
            object.keys().collect::<Vec<_>>()
        );

        let image = match object.get("image") {
            None => return Err(NO_IMAGE_MESSAGE.to_string()),
            Some(Value::String(image)) => image.clone(),
            Some(_) => return Err(IMAGE_NOT_STRING_MESSAGE.to_string()),
        };

        let force_extraction = object.get("force_extraction").is_some_and(is_truthy);

        Ok(Self {
            image,
            force_extraction,
        })
    }
}

/// JSON truthiness: empty containers, empty strings, zero, `false` and `null` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The remote call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    /// Step 1: reading the raw text off the image.
    TextExtraction,
    /// Step 2: structuring the raw text into fields.
    FieldStructuring,
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStage::TextExtraction => write!(f, "text extraction"),
            ExtractionStage::FieldStructuring => write!(f, "license info extraction"),
        }
    }
}

/// Wall-clock durations of one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingTime {
    pub extraction: Duration,
    pub structuring: Duration,
    pub total: Duration,
}

/// Formats a duration as seconds with two decimals, e.g. `"1.23s"`.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

/// The payload of a successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSuccess {
    pub fields: LicenseFields,
    /// Text read off the image by the first call.
    pub raw_text: String,
    /// The unparsed `Key: Value` listing from the second call.
    pub license_info: String,
    pub processing_time: ProcessingTime,
}

/// The result of handling one extraction request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Success(ExtractionSuccess),
    /// The model reported no license and extraction was not forced.
    NoLicense,
    RemoteError {
        stage: ExtractionStage,
        message: String,
        /// Step 1 output, when the failure happened after it.
        raw_text: Option<String>,
    },
    MalformedRequest(String),
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success(_))
    }
}
