//! Login Use Case
//!
//! Authenticates a user by email and password and issues a token.
//! Every failure is `InvalidCredentials`, whether the email is malformed,
//! unknown, or the password is wrong.

use std::sync::Arc;

use kernel::store::with_timeout;

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let password = RawPassword::for_login(input.password);

        let user = match Email::new(&input.email) {
            Ok(email) => {
                with_timeout(
                    self.config.store_timeout,
                    self.user_repo.find_by_email(&email),
                )
                .await?
            }
            Err(_) => None,
        };

        // Unknown accounts still pay for one verification
        let stored = user.as_ref().map(|u| u.password_hash.clone());
        let pepper = self.config.password_pepper.clone();
        let password_valid = tokio::task::spawn_blocking(move || match stored {
            Some(hash) => hash.verify(&password, pepper.as_deref()),
            None => {
                UserPassword::verify_dummy(&password, pepper.as_deref());
                false
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = issue_token(&self.config, &user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, token })
    }
}
