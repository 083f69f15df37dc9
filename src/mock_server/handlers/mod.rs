//! HTTP request handlers for the mock server.

pub mod checks;
pub mod nodes;
pub mod recipients;
pub mod status_pages;

pub use checks::*;
pub use nodes::*;
pub use recipients::*;
pub use status_pages::*;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};

/// updown-style error body: `{"error": "..."}`.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

pub(crate) fn deleted_response(deleted: bool) -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "deleted": deleted }))).into_response()
}
