//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldViolation},
    kind::ErrorKind,
};
use kernel::store::StoreError;
use platform::bearer::BearerError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email (or user name) already registered
    #[error("User with this email or username already exists")]
    AlreadyExists,

    /// One or more input fields rejected
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No usable `Authorization: Bearer` header
    #[error("{0}")]
    MissingToken(#[from] BearerError),

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    /// Token verified but its user is gone
    #[error("User not found")]
    UserNotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::AlreadyExists => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingToken(_)
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Store(e) => e.kind(),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their detail as the error source only.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(violations) => AppError::validation(violations),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::internal().with_source(AuthError::Internal(msg)),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected invalid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::TokenInvalid,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
