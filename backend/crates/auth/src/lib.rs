//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with username + email + password
//! - Login by email, answered with a signed bearer token
//! - Profile lookup for the authenticated caller
//! - `require_auth` middleware yielding a [`Principal`] for other crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (salted, optional pepper)
//! - Stateless HS256 tokens with expiry
//! - Login failures are indistinguishable (`InvalidCredentials`)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::principal::Principal;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
