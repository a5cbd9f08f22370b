//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Feature, Vote, Voter)
//! - Domain value objects (FeatureTitle, FeatureDescription)
//! - Domain services (ownership gate, listing order)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
