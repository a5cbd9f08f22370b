//! Voting Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, ranking and ownership rules, repository traits
//! - `application/` - Feature and vote use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Invariants
//! - At most one vote per (user, feature); the store's unique constraint is
//!   the authority and a losing concurrent insert becomes `DuplicateVote`
//! - Vote counts are always computed live, never cached
//! - Only a feature's creator (as recorded by the store) may change or delete it

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::VotingConfig;
pub use error::{VotingError, VotingResult};
pub use infra::postgres::PgVotingRepository;
pub use presentation::router::{
    feature_router, feature_router_generic, vote_router, vote_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
