//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`], [`FieldViolation`] and the [`AppResult<T>`] alias.
//! Crate-specific errors (`AuthError`, `VotingError`) convert into
//! `AppError` right before they are rendered.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

/// A single rejected input field
///
/// Rendered in the `errors` array of a validation problem response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Cow<'static, str>,
    pub message: Cow<'static, str>,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Unified application error
///
/// ## Fields
/// * `kind` - classification, mapped to an HTTP status
/// * `message` - caller-facing message
/// * `violations` - field-level details for validation failures
/// * `source` - underlying error, kept for logs only
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, FieldViolation};
/// use kernel::error::kind::ErrorKind;
///
/// let err = AppError::new(ErrorKind::NotFound, "Feature not found");
/// assert_eq!(err.status_code(), 404);
///
/// let err = AppError::validation(vec![FieldViolation::new("title", "must not be empty")]);
/// assert_eq!(err.violations().len(), 1);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    violations: Vec<FieldViolation>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            violations: Vec::new(),
            source: None,
        }
    }

    /// 400 with field-level details
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self {
            violations,
            ..Self::bad_request("Invalid input")
        }
    }

    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// 500 with a fixed opaque message; detail belongs in `source` and logs
    #[inline]
    pub fn internal() -> Self {
        Self::new(ErrorKind::InternalServerError, "Internal server error")
    }

    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    #[inline]
    pub fn gateway_timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::GatewayTimeout, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach the underlying error (debugging only, never rendered)
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if !self.violations.is_empty() {
            builder.field("violations", &self.violations);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "Feature not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Feature not found");
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::bad_request("test").status_code(), 400);
        assert_eq!(AppError::unauthorized("test").status_code(), 401);
        assert_eq!(AppError::forbidden("test").status_code(), 403);
        assert_eq!(AppError::not_found("test").status_code(), 404);
        assert_eq!(AppError::conflict("test").status_code(), 409);
        assert_eq!(AppError::internal().status_code(), 500);
        assert_eq!(AppError::service_unavailable("test").status_code(), 503);
        assert_eq!(AppError::gateway_timeout("test").status_code(), 504);
    }

    #[test]
    fn test_validation_carries_violations() {
        let err = AppError::validation(vec![
            FieldViolation::new("title", "must be at most 200 characters"),
            FieldViolation::new("description", "must not be empty"),
        ]);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.violations().len(), 2);
        assert!(err.to_string().contains("title: must be at most 200"));
    }

    #[test]
    fn test_internal_is_opaque() {
        let io_err = std::io::Error::other("connection reset by peer at 10.0.0.3");
        let err = AppError::internal().with_source(io_err);
        assert_eq!(err.message(), "Internal server error");
        assert!(!err.to_string().contains("10.0.0.3"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("Feature not found");
        assert_eq!(err.to_string(), "[Not Found] Feature not found");
    }
}
