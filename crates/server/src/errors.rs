use crate::types::ExtractResponse;
use axum::{
    extract::rejection::BytesRejection,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use tracing::error;

/// A custom error type for the server application.
///
/// Failures that escape the extraction pipeline still answer with HTTP 200 and
/// an error body, so clients only ever branch on `status`.
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read.
    Body(BytesRejection),
}

impl From<BytesRejection> for AppError {
    fn from(err: BytesRejection) -> Self {
        AppError::Body(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let response = match self {
            AppError::Body(rejection) => {
                error!("Failed to read request body: {rejection}");
                ExtractResponse::server_error(rejection.body_text())
            }
        };
        Json(response).into_response()
    }
}

/// Turns a handler panic into the same error body as any other server failure.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Unexpected error processing request: {details}");
    Json(ExtractResponse::server_error(details)).into_response()
}
