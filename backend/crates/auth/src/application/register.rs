//! Register Use Case
//!
//! Creates a new user account and issues its first token.

use std::sync::Arc;

use kernel::error::app_error::FieldViolation;
use kernel::store::with_timeout;

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (user_name, email, password) = validate(input)?;

        if with_timeout(
            self.config.store_timeout,
            self.user_repo.exists_by_email(&email),
        )
        .await?
        {
            return Err(AuthError::AlreadyExists);
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let pepper = self.config.password_pepper.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&password, pepper.as_deref())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        let new_user = NewUser {
            user_name,
            email,
            password_hash,
        };

        // A concurrent registration can win between the check and the insert
        let user = match with_timeout(self.config.store_timeout, self.user_repo.create(&new_user))
            .await
        {
            Ok(user) => user,
            Err(e) if e.is_unique_violation() => return Err(AuthError::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        let token = issue_token(&self.config, &user)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterOutput { user, token })
    }
}

/// Validate every field, reporting all violations at once
fn validate(input: RegisterInput) -> AuthResult<(UserName, Email, RawPassword)> {
    let mut violations = Vec::new();

    let user_name = match UserName::new(&input.user_name) {
        Ok(v) => Some(v),
        Err(e) => {
            violations.push(FieldViolation::new("username", e.to_string()));
            None
        }
    };

    let email = match Email::new(&input.email) {
        Ok(v) => Some(v),
        Err(e) => {
            violations.push(FieldViolation::new("email", e.to_string()));
            None
        }
    };

    let password = match RawPassword::new(input.password) {
        Ok(v) => Some(v),
        Err(e) => {
            violations.push(FieldViolation::new("password", e.to_string()));
            None
        }
    };

    match (user_name, email, password) {
        (Some(user_name), Some(email), Some(password)) => Ok((user_name, email, password)),
        _ => Err(AuthError::Validation(violations)),
    }
}
