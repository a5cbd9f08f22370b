//! Token Issuing and Verification

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::entity::{principal::Principal, user::User};
use crate::error::AuthResult;

/// Issue a bearer token for a stored user
pub fn issue_token(config: &AuthConfig, user: &User) -> AuthResult<String> {
    Ok(config
        .token_signer()
        .issue(user.user_id.as_i64(), user.email.as_str())?)
}

/// Verify a bearer token and recover its principal
///
/// Stateless: no store access.
pub struct VerifyTokenUseCase {
    signer: TokenSigner,
}

impl VerifyTokenUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            signer: config.token_signer(),
        }
    }

    pub fn execute(&self, token: &str) -> AuthResult<Principal> {
        let claims = self.signer.verify(token)?;
        Ok(Principal {
            user_id: UserId::from_i64(claims.user_id),
            email: claims.email,
        })
    }
}
