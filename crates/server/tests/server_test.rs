//! # Server Tests
//!
//! Routing, the upload page, and the error envelope for requests that never
//! reach the completion provider.

mod common;

use crate::common::TestApp;
use licensescan_test_utils::{sample_image_base64, MockAiProvider};
use serde_json::json;

#[tokio::test]
async fn test_index_serves_upload_page() {
    let app = TestApp::spawn_with_provider(MockAiProvider::new())
        .await
        .unwrap();

    let response = app.client.get(&app.address).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = response.text().await.unwrap();
    assert!(body.contains("/extract"));
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn_with_provider(MockAiProvider::new())
        .await
        .unwrap();

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_missing_image_field() {
    let provider = MockAiProvider::new();
    let app = TestApp::spawn_with_provider(provider.clone()).await.unwrap();

    let (status, body) = app
        .post_extract(&json!({"force_extraction": true}))
        .await
        .unwrap();

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"status": "error", "message": "No image data provided"})
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_empty_and_invalid_bodies() {
    let provider = MockAiProvider::new();
    let app = TestApp::spawn_with_provider(provider.clone()).await.unwrap();

    for raw in ["", "not json", "{}", "null"] {
        let (status, body) = app.post_extract_raw(raw).await.unwrap();
        assert_eq!(status, 200, "body {raw:?}");
        assert_eq!(body["status"], "error", "body {raw:?}");
        assert_eq!(body["message"], "No JSON data provided", "body {raw:?}");
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_empty_image_string_is_forwarded() {
    let provider = MockAiProvider::with_texts(["NO_LICENSE_DETECTED"]);
    let app = TestApp::spawn_with_provider(provider.clone()).await.unwrap();

    let (status, body) = app.post_extract(&json!({"image": ""})).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["analysis"]["license_detected"], false);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(provider.calls()[0].image.as_deref(), Some(""));
}

#[tokio::test]
async fn test_non_string_image() {
    let app = TestApp::spawn_with_provider(MockAiProvider::new())
        .await
        .unwrap();

    let (status, body) = app.post_extract(&json!({"image": 42})).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Image data must be a base64 string");
}

#[tokio::test]
async fn test_panic_in_provider_still_answers_with_error_envelope() {
    let provider = MockAiProvider::new();
    provider.push_panic("provider exploded");
    let app = TestApp::spawn_with_provider(provider.clone()).await.unwrap();

    let (status, body) = app
        .post_extract(&json!({"image": sample_image_base64()}))
        .await
        .unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Server error: provider exploded");

    // The server keeps serving after a panic.
    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_oversized_body_answers_with_error_envelope() {
    let provider = MockAiProvider::new();
    let app = TestApp::spawn_with_provider_and_config(provider.clone(), |config| {
        config.body_limit_bytes = 64;
    })
    .await
    .unwrap();

    let image = "A".repeat(10 * 1024);
    let (status, body) = app.post_extract(&json!({"image": image})).await.unwrap();

    assert_eq!(status, 200);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Server error:"), "{message}");
    assert_eq!(provider.call_count(), 0);
}
