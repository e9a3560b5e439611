use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::message::ErrorResponse;

pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Failures surfaced to the widget as a non-200 status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The inner message is logged, never sent to the client.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Unauthorized(detail) => (StatusCode::UNAUTHORIZED, detail),
            AppError::Internal(cause) => {
                error!(%cause, "chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("malformed request body: {e}"))
    }
}
