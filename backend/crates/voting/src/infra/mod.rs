//! Infrastructure Layer
//!
//! Database implementations of the repository traits.

pub mod postgres;

pub use postgres::PgVotingRepository;
