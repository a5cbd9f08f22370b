//! In-memory repositories for tests
//!
//! Enforces the same uniqueness rules as the `users` table so use cases
//! see identical constraint violations without PostgreSQL.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use kernel::id::UserId;
use kernel::store::{StoreError, StoreResult};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    next_id: i64,
    stall: Option<Duration>,
}

/// Shared, cloneable in-memory user store
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every subsequent call, to exercise bounded waits
    pub fn stall_for(&self, delay: Duration) {
        self.lock().stall = Some(delay);
    }

    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn maybe_stall(&self) {
        let stall = self.lock().stall;
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> StoreResult<User> {
        self.maybe_stall().await;
        let mut inner = self.lock();

        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::unique("users_email_key"));
        }
        if inner.users.iter().any(|u| u.user_name == user.user_name) {
            return Err(StoreError::unique("users_username_key"));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let stored = User {
            user_id: UserId::from_i64(inner.next_id),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        self.maybe_stall().await;
        Ok(self.lock().users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
        self.maybe_stall().await;
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> StoreResult<bool> {
        self.maybe_stall().await;
        Ok(self.lock().users.iter().any(|u| &u.email == email))
    }
}
