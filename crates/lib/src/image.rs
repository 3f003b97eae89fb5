//! # Image Payloads
//!
//! Clients may send either bare base64 text or a full data URL
//! (`data:image/png;base64,....`). The remote services only ever see the bare
//! base64 payload, re-labelled as JPEG.

/// The marker that identifies a data-URL prefixed payload.
pub const DATA_URL_MARKER: &str = "data:image";

/// The media type attached to every outbound image, regardless of the real encoding.
pub const OUTBOUND_MIME_TYPE: &str = "image/jpeg";

/// A base64 image ready to be forwarded to a completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    base64: String,
}

impl ImageData {
    /// Builds an `ImageData` from the raw `image` value of a request, dropping
    /// any data-URL prefix.
    pub fn from_payload(payload: &str) -> Self {
        Self {
            base64: strip_data_url_prefix(payload).to_string(),
        }
    }

    /// The bare base64 payload.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    pub fn mime_type(&self) -> &'static str {
        OUTBOUND_MIME_TYPE
    }

    /// Renders the payload as an inline `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.base64)
    }
}

/// Removes everything up to and including the first comma when the payload
/// starts with `data:image`. Payloads without a comma are returned untouched.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    if !payload.starts_with(DATA_URL_MARKER) {
        return payload;
    }
    match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    }
}
