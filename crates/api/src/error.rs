use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use commander_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds a variant for opaque
/// storage failures. Implements [`IntoResponse`] as the sole translator
/// from error kind to wire status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `commander_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An opaque storage failure, propagated unmodified from the store.
    #[error("Storage error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Absence is a normal outcome: 404 with an empty body.
            AppError::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND.into_response(),

            AppError::Core(CoreError::Validation(violations)) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "errors": violations,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
            }

            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error()
            }

            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                internal_error()
            }
        }
    }
}

/// Sanitized 500 response; details stay in the logs.
fn internal_error() -> Response {
    let body = json!({
        "error": "An internal error occurred",
        "code": "INTERNAL_ERROR",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}
