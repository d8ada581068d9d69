//! # API Error Mapping
//!
//! Converts the typed errors from the inner crates into HTTP responses.
//! Gate failures keep their exact `{ "message": ... }` bodies; everything
//! else gets a structured `{ error, code }` body instead of crashing the
//! handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use store_auth::AuthError;
use store_core::StoreError;

/// Error response body for non-gate failures
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

/// Unified handler error
#[derive(Debug)]
pub enum ApiError {
    /// Gate failure: responds with the auth contract's status and message
    Auth(AuthError),
    /// Store or provider failure: responds with `{ error, code }`
    Store(StoreError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(serde_json::json!({ "message": err.message() })))
                    .into_response()
            }
            ApiError::Store(err) => {
                let code = err.status_code();
                let status = StatusCode::from_u16(code)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", err);
                }
                (
                    status,
                    Json(ErrorBody {
                        error: err.to_string(),
                        code,
                    }),
                )
                    .into_response()
            }
        }
    }
}
