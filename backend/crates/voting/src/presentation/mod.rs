//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers for features and votes.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::VotingAppState;
pub use router::{feature_router, feature_router_generic, vote_router, vote_router_generic};
