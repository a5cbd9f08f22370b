//! Principal
//!
//! Authenticated identity derived from a verified token. Handlers behind
//! the auth middleware take it as an extractor.

use kernel::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
}
