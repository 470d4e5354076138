use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::AppError;

/// HTTP face of [`AppError`]. Bodies are `{"error": ..., "details"?: ...}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError(AppError::NotFound(format!("{} '{}'", resource, id)))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError(AppError::Validation(msg.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.0.to_string() }),
            ),
            AppError::MissingApiKey(_) | AppError::Config(_) => {
                tracing::error!("{}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "AI provider not configured" }),
                )
            }
            AppError::UpstreamStatus { status, body } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Failed to get response from AI provider",
                    "status": status,
                    "details": body,
                }),
            ),
            AppError::Http(e) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Failed to get response from AI provider",
                    "details": e.to_string(),
                }),
            ),
            AppError::UpstreamShape(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Unexpected response structure from AI provider",
                    "details": msg,
                }),
            ),
            other => {
                tracing::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
