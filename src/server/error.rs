//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`cineredux_common::Error`] so that route
//! handlers can return `Result<T, ApiError>` and use `?` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cineredux_common::Error;
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self.0 {
            Error::Upstream { status: upstream, detail } => {
                tracing::warn!(
                    status = %status,
                    upstream_status = ?upstream,
                    detail = %detail,
                    "Upstream movie database call failed"
                );
            }
            e if status.is_server_error() => {
                tracing::error!(status = %status, error = %e, "Server error in API handler");
            }
            _ => {}
        }

        (status, axum::Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
