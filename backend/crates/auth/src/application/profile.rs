//! Profile Use Case
//!
//! Loads the account behind a verified principal.

use std::sync::Arc;

use kernel::store::with_timeout;

use crate::application::config::AuthConfig;
use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, principal: &Principal) -> AuthResult<User> {
        with_timeout(
            self.config.store_timeout,
            self.user_repo.find_by_id(principal.user_id),
        )
        .await?
        .ok_or(AuthError::UserNotFound)
    }
}
