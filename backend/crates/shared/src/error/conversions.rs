//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion into [`AppError`] and the HTTP rendering.

use super::app_error::AppError;
use crate::store::{ConstraintKind, StoreError};

// ============================================================================
// Store conversions
// ============================================================================

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound => AppError::not_found("Record not found").with_source(err),
            StoreError::ConstraintViolation { kind, .. } => match kind {
                ConstraintKind::Unique => {
                    AppError::conflict("Duplicate key value").with_source(err)
                }
                ConstraintKind::ForeignKey => {
                    AppError::conflict("Referenced record does not exist").with_source(err)
                }
                ConstraintKind::Other => AppError::internal().with_source(err),
            },
            StoreError::Timeout => {
                AppError::gateway_timeout("Database did not respond in time").with_source(err)
            }
            StoreError::Unavailable(_) => {
                AppError::service_unavailable("Database unavailable").with_source(err)
            }
            StoreError::Unknown(_) => AppError::internal().with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "retryable": self.kind().is_retryable(),
        });
        if !self.violations().is_empty() {
            body["errors"] = serde_json::json!(self.violations());
        }

        (status, Json(body)).into_response()
    }
}
