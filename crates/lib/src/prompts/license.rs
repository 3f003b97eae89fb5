//! # Driver's License Prompts
//!
//! Prompt templates and fixed user-facing strings for the two-step
//! extraction flow: raw text extraction from the image, then structuring of
//! that text into `Key: Value` lines.

/// The exact reply the model gives when no license is visible.
pub const NO_LICENSE_SENTINEL: &str = "NO_LICENSE_DETECTED";

/// The system prompt for the raw text extraction step.
pub const TEXT_EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a specialized assistant that extracts text from driver's license images.

First, identify the driver's license in the image - it will be a rectangular card with text and possibly a photo.
Even if the license only takes up a small portion of the image or has a busy background, focus only on the license.

Once you've located the license in the image:
1. Extract all visible text from ONLY the license portion
2. Ignore any text that is not on the license itself
3. Format the extracted text clearly

If you cannot find a driver's license in the image, respond with only: "NO_LICENSE_DETECTED""#;

/// The user prompt sent alongside the image in the raw text extraction step.
pub const TEXT_EXTRACTION_USER_PROMPT: &str =
    "Extract all text from the driver's license in this image, ignoring any background:";

/// The system prompt for the field structuring step.
pub const FIELD_STRUCTURING_SYSTEM_PROMPT: &str = r#"You are a specialized assistant that extracts driver's license information from text.
Analyze the following text and extract structured information for these fields if present:
- LIC# (License Number)
- Name (Full name as it appears)
- DOB (Date of Birth)
- Issue Date
- Expiration Date
- Address (Full address including city, state, zip)
- Sex
- Height
- Weight
- Eyes (Eye color)
- Restriction
- Class (License class)
- DD# (Document Discriminator Number)
- Donor status
- Revision date

Format your response as key-value pairs with a colon between the key and value, one per line.
If you can't find information for a field, don't include it.
Don't make up information or guess. Extract only what's clearly present in the text."#;

/// The user prompt for the field structuring step.
///
/// Placeholders: `{text}`
pub const FIELD_STRUCTURING_USER_PROMPT: &str =
    "Extract driver's license information from this text:\n\n{text}";

/// The field name used when structuring yields nothing parseable.
pub const RAW_TEXT_FIELD: &str = "Raw Extracted Text";

/// The message returned when the model could not find a license.
pub const NO_LICENSE_MESSAGE: &str = "Could not clearly detect a driver's license in the image";

/// Advice returned to the client when no license was detected.
pub const RETAKE_SUGGESTIONS: [&str; 4] = [
    "Make sure your driver's license is visible in the image",
    "Ensure good lighting with minimal glare",
    "Hold the license parallel to the camera",
    "Use a contrasting background",
];

/// Fills the field structuring user prompt with the raw extracted text.
pub fn field_structuring_user_prompt(raw_text: &str) -> String {
    FIELD_STRUCTURING_USER_PROMPT.replace("{text}", raw_text)
}

/// Returns true when the model reported that no license is present.
pub fn is_no_license_reply(text: &str) -> bool {
    text.trim() == NO_LICENSE_SENTINEL
}
