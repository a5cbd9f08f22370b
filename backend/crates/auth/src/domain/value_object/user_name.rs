//! User Name Value Object
//!
//! Display name chosen at registration. Unique across users.
//!
//! ## Invariants
//! - NFKC normalized and trimmed
//! - Length: 3 to 50 characters (code points, after normalization)
//! - No control characters

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username must be between {min} and {max} characters")]
    Length { length: usize, min: usize, max: usize },

    #[error("Username cannot contain control characters")]
    ControlCharacter,
}

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = input.as_ref().nfkc().collect::<String>().trim().to_string();

        let length = normalized.chars().count();
        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&length) {
            return Err(UserNameError::Length {
                length,
                min: USER_NAME_MIN_LENGTH,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if normalized.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserName::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
