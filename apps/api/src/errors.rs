use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::tailoring::resolver::ResolveError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(#[from] ExtractionError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl AppError {
    /// Stable machine-readable code sent to callers.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AppError::Resolve(ResolveError::Upstream(_)) => "UPSTREAM_ERROR",
            AppError::Resolve(ResolveError::NoJsonFound) => "NO_JSON_FOUND",
            AppError::Resolve(ResolveError::InvalidJson(_)) => "INVALID_JSON",
            AppError::Resolve(ResolveError::SchemaMismatch(_)) => "SCHEMA_MISMATCH",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, details) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone(), None),
            AppError::ExtractionFailed(e) => {
                tracing::warn!("Extraction failed: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string(), None)
            }
            AppError::Resolve(e) => {
                tracing::error!("Tailoring failed [{code}]: {e}");
                let details = match e {
                    ResolveError::SchemaMismatch(fields) => Some(fields.clone()),
                    _ => None,
                };
                (StatusCode::BAD_GATEWAY, e.to_string(), details)
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
