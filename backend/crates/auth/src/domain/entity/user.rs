//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword,
};

/// Persisted user account
///
/// Created at registration and never deleted through the API.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Display name (unique)
    pub user_name: UserName,
    /// Login identifier (unique, lower-cased)
    pub email: Email,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The identity a token for this user carries
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            email: self.email.as_str().to_string(),
        }
    }
}

/// A user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password_hash: UserPassword,
}
