//! Voting Error Types
//!
//! This module provides voting-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldViolation},
    kind::ErrorKind,
};
use kernel::store::StoreError;
use thiserror::Error;

/// Voting-specific result type alias
pub type VotingResult<T> = Result<T, VotingError>;

/// Voting-specific error variants
#[derive(Debug, Error)]
pub enum VotingError {
    #[error("Feature not found")]
    FeatureNotFound,

    /// Requester is not the feature's creator
    #[error("{0}")]
    Forbidden(&'static str),

    /// The (user, feature) pair already has a vote
    #[error("You have already voted for this feature")]
    DuplicateVote,

    #[error("Vote not found")]
    VoteNotFound,

    /// One or more input fields rejected
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VotingError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            VotingError::FeatureNotFound | VotingError::VoteNotFound => ErrorKind::NotFound,
            VotingError::Forbidden(_) => ErrorKind::Forbidden,
            VotingError::DuplicateVote => ErrorKind::Conflict,
            VotingError::Validation(_) => ErrorKind::BadRequest,
            VotingError::Store(e) => e.kind(),
            VotingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            VotingError::Validation(violations) => AppError::validation(violations),
            VotingError::Store(e) => AppError::from(e),
            VotingError::Internal(msg) => {
                AppError::internal().with_source(VotingError::Internal(msg))
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            VotingError::Store(StoreError::Timeout) => {
                tracing::warn!("Voting store call timed out");
            }
            VotingError::Store(e) => {
                tracing::error!(error = %e, "Voting store error");
            }
            VotingError::Internal(msg) => {
                tracing::error!(message = %msg, "Voting internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Voting error");
            }
        }
    }
}

impl IntoResponse for VotingError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(VotingError::FeatureNotFound.status_code(), 404);
        assert_eq!(VotingError::VoteNotFound.status_code(), 404);
        assert_eq!(VotingError::Forbidden("no").status_code(), 403);
        assert_eq!(VotingError::DuplicateVote.status_code(), 409);
        assert_eq!(VotingError::Validation(vec![]).status_code(), 400);
        assert_eq!(VotingError::Store(StoreError::Timeout).status_code(), 504);
    }

    #[test]
    fn test_timeout_is_retryable() {
        assert!(VotingError::Store(StoreError::Timeout).is_retryable());
        assert!(!VotingError::DuplicateVote.is_retryable());
    }

    #[test]
    fn test_forbidden_message_is_rendered() {
        let app = VotingError::Forbidden("You can only delete your own features").into_app_error();
        assert_eq!(app.status_code(), 403);
        assert_eq!(app.message(), "You can only delete your own features");
    }

    #[test]
    fn test_store_detail_not_exposed() {
        let app = VotingError::Store(StoreError::Unknown("syntax error at \"FORM\"".into()))
            .into_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("FORM"));
    }
}
