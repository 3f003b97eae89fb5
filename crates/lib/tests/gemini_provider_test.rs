//! # Gemini Provider Tests
//!
//! Checks that `GeminiProvider` sends the system instruction, the inline
//! image and the output cap in Gemini's request shape, and that it joins
//! multi-part answers.

mod common;

use crate::common::setup_tracing;
use httpmock::{Method, MockServer};
use licensescan::{
    providers::ai::{gemini::GeminiProvider, AiProvider, CompletionRequest},
    ImageData, ProviderError,
};
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn provider_for(mock_server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(mock_server.url(PATH), "gemini-key".to_string(), None)
        .expect("Failed to create GeminiProvider")
}

#[tokio::test]
async fn test_image_request_wire_format_and_part_joining() {
    setup_tracing();
    let mock_server = MockServer::start();
    let generate_mock = mock_server.mock(|when, then| {
        when.method(Method::POST)
            .path(PATH)
            .header("x-goog-api-key", "gemini-key")
            .body_contains(r#""systemInstruction":{"parts":[{"text":"read the card"}]}"#)
            .body_contains(r#""inline_data":{"mime_type":"image/jpeg","data":"AAAA"}"#)
            .body_contains(r#""generationConfig":{"maxOutputTokens":500}"#);
        then.status(200).json_body(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "DL D1234567\n"}, {"text": "JANE DOE"}]}
            }]
        }));
    });

    let image = ImageData::from_payload("AAAA");
    let request = CompletionRequest::with_image("read the card", "what does it say?", &image, 500);
    let result = provider_for(&mock_server).generate(&request).await.unwrap();

    assert_eq!(result, "DL D1234567\nJANE DOE");
    generate_mock.assert();
}

#[tokio::test]
async fn test_blocked_candidate_is_an_empty_completion() {
    setup_tracing();
    let mock_server = MockServer::start();
    mock_server.mock(|when, then| {
        when.method(Method::POST).path(PATH);
        then.status(200)
            .json_body(json!({"candidates": [{"finishReason": "SAFETY"}]}));
    });

    let request = CompletionRequest::text("system", "user", 500);
    let err = provider_for(&mock_server)
        .generate(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::EmptyCompletion));
}

#[tokio::test]
async fn test_non_success_status_maps_to_api_error() {
    setup_tracing();
    let mock_server = MockServer::start();
    mock_server.mock(|when, then| {
        when.method(Method::POST).path(PATH);
        then.status(400).body("API key not valid");
    });

    let request = CompletionRequest::text("system", "user", 500);
    let err = provider_for(&mock_server)
        .generate(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::AiApi(m) if m.contains("API key not valid")));
}

#[tokio::test]
async fn test_empty_text_part_is_returned_as_is() {
    setup_tracing();
    let mock_server = MockServer::start();
    mock_server.mock(|when, then| {
        when.method(Method::POST).path(PATH);
        then.status(200).json_body(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": ""}]}}]
        }));
    });

    let request = CompletionRequest::text("system", "user", 500);
    let result = provider_for(&mock_server).generate(&request).await.unwrap();

    assert_eq!(result, "");
}

#[test]
fn test_debug_output_hides_api_key() {
    let mock_server = MockServer::start();
    let rendered = format!("{:?}", provider_for(&mock_server));
    assert!(rendered.contains("GeminiProvider"));
    assert!(!rendered.contains("gemini-key"));
}
