//! User Password Value Object
//!
//! Domain wrappers over `platform::password`.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError, dummy_verify,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the registration policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    /// Wrap a login attempt; no policy applied
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed)
// ============================================================================

/// Stored password hash (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    pub fn from_db(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Burn a verification's worth of work for an unknown account
    pub fn verify_dummy(raw: &RawPassword, pepper: Option<&[u8]>) {
        dummy_verify(raw.inner(), pepper);
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
