//! # Extraction Handler
//!
//! `POST /extract` reads a JSON body carrying a base64 image and answers
//! with the structured license fields.

use super::{AppError, AppState, ExtractResponse};
use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};
use tracing::info;

/// The handler for the `/extract` endpoint.
///
/// The body is taken as raw bytes so that a missing or malformed body is
/// reported in the JSON envelope instead of as an extractor rejection. The
/// `Content-Type` header is not checked.
pub async fn extract_handler(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let body = body?;
    info!("Received extraction request ({} bytes)", body.len());

    let outcome = app_state.extractor.process_body(&body).await;
    Ok(Json(ExtractResponse::from(outcome)))
}
