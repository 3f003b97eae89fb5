//! # General Route Handlers
//!
//! The upload page and the health check.

use axum::response::Html;
use tracing::debug;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// The handler for the root (`/`) endpoint. Serves the upload page.
pub async fn index() -> Html<&'static str> {
    debug!("Serving index page");
    Html(INDEX_HTML)
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
