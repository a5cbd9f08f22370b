//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Failures are reported in the shared store taxonomy; uniqueness of email
//! and user name is enforced by the store and surfaces as a unique
//! constraint violation from `create`.

use kernel::id::UserId;
use kernel::store::StoreResult;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::email::Email;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return it with its assigned id
    async fn create(&self, user: &NewUser) -> StoreResult<User>;

    /// Find user by (lower-cased) email
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> StoreResult<bool>;
}
