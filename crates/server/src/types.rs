//! # API Payloads
//!
//! The JSON body of `POST /extract`. Every outcome, including failures, is
//! sent with HTTP 200; clients branch on `status`.

use licensescan::{
    prompts::license::{NO_LICENSE_MESSAGE, RETAKE_SUGGESTIONS},
    types::format_seconds,
    ExtractionOutcome, ExtractionSuccess, LicenseFields,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractResponse {
    Success {
        data: LicenseFields,
        raw_text: String,
        license_info: String,
        processing_time: ProcessingTimeBody,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        analysis: Option<Analysis>,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestions: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_text: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub license_detected: bool,
}

#[derive(Debug, Serialize)]
pub struct ProcessingTimeBody {
    pub extraction_time: String,
    pub license_processing_time: String,
    pub total_time: String,
}

impl ExtractResponse {
    /// A bare error carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        ExtractResponse::Error {
            message: message.into(),
            analysis: None,
            suggestions: None,
            raw_text: None,
        }
    }

    /// The response for failures nothing else handled.
    pub fn server_error(details: impl std::fmt::Display) -> Self {
        Self::error(format!("Server error: {details}"))
    }
}

impl From<ExtractionSuccess> for ExtractResponse {
    fn from(success: ExtractionSuccess) -> Self {
        let times = success.processing_time;
        ExtractResponse::Success {
            data: success.fields,
            raw_text: success.raw_text,
            license_info: success.license_info,
            processing_time: ProcessingTimeBody {
                extraction_time: format_seconds(times.extraction),
                license_processing_time: format_seconds(times.structuring),
                total_time: format_seconds(times.total),
            },
        }
    }
}

impl From<ExtractionOutcome> for ExtractResponse {
    fn from(outcome: ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Success(success) => success.into(),
            ExtractionOutcome::NoLicense => ExtractResponse::Error {
                message: NO_LICENSE_MESSAGE.to_string(),
                analysis: Some(Analysis {
                    license_detected: false,
                }),
                suggestions: Some(RETAKE_SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
                raw_text: None,
            },
            ExtractionOutcome::RemoteError {
                message, raw_text, ..
            } => ExtractResponse::Error {
                message,
                analysis: None,
                suggestions: None,
                raw_text,
            },
            ExtractionOutcome::MalformedRequest(message) => Self::error(message),
        }
    }
}
