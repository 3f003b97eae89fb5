//! # Driver's License Extraction
//!
//! This crate reads driver's license images through a configurable
//! vision-capable completion provider. One call extracts the visible text,
//! a second call structures it into `Key: Value` fields, which are then
//! parsed into an ordered map.

pub mod errors;
pub mod extractor;
pub mod fields;
pub mod image;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::ProviderError;
pub use extractor::{LicenseExtractor, LicenseExtractorBuilder};
pub use fields::{parse_license_fields, LicenseFields};
pub use image::ImageData;
pub use types::{
    ExtractionOutcome, ExtractionRequest, ExtractionStage, ExtractionSuccess, ProcessingTime,
};
