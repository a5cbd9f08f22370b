//! Store Failure Taxonomy
//!
//! Every repository in the workspace reports failures as [`StoreError`].
//! Use cases translate these into their own domain errors; in particular a
//! unique-constraint violation is how the store tells the core that a
//! conflicting write lost the race.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::error::kind::ErrorKind;

/// Which integrity rule a write broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// UNIQUE / PRIMARY KEY
    Unique,
    /// FOREIGN KEY
    ForeignKey,
    /// CHECK, NOT NULL, exclusion ...
    Other,
}

/// Store-level failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("{kind:?} constraint violated ({})", .constraint.as_deref().unwrap_or("unnamed"))]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: Option<String>,
    },

    /// The call did not finish within the bounded wait. Retryable.
    #[error("Store call timed out")]
    Timeout,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Unknown(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn unique(constraint: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            kind: ConstraintKind::Unique,
            constraint: Some(constraint.into()),
        }
    }

    pub fn foreign_key(constraint: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            constraint: Some(constraint.into()),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::ConstraintViolation {
                kind: ConstraintKind::Unique,
                ..
            }
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            Self::ConstraintViolation {
                kind: ConstraintKind::ForeignKey,
                ..
            }
        )
    }

    /// How the failure surfaces when nothing more specific applies
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::ConstraintViolation {
                kind: ConstraintKind::Unique | ConstraintKind::ForeignKey,
                ..
            } => ErrorKind::Conflict,
            Self::ConstraintViolation { .. } | Self::Unknown(_) => ErrorKind::InternalServerError,
            Self::Timeout => ErrorKind::GatewayTimeout,
            Self::Unavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// Name of the violated constraint, if the store reported one
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::ConstraintViolation { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }
}

/// Run a store call with an upper bound on how long the caller waits.
///
/// An elapsed deadline becomes [`StoreError::Timeout`]; the inner future is
/// dropped, which cancels the in-flight query on its connection.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout),
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let constraint = db_err.constraint().map(str::to_owned);
                match db_err.code().as_deref() {
                    Some("23505") => StoreError::ConstraintViolation {
                        kind: ConstraintKind::Unique,
                        constraint,
                    },
                    Some("23503") => StoreError::ConstraintViolation {
                        kind: ConstraintKind::ForeignKey,
                        constraint,
                    },
                    Some(code) if code.starts_with("23") => StoreError::ConstraintViolation {
                        kind: ConstraintKind::Other,
                        constraint,
                    },
                    // query_canceled: statement_timeout fired server-side
                    Some("57014") => StoreError::Timeout,
                    Some(code) if code.starts_with("53") || code.starts_with("57P") => {
                        StoreError::Unavailable(err.to_string())
                    }
                    _ => StoreError::Unknown(err.to_string()),
                }
            }
            _ => StoreError::Unknown(err.to_string()),
        }
    }
}
