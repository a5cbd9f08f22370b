//! Application Layer
//!
//! Use cases for features and votes. Each use case holds only `Arc`s to its
//! repository and config and wraps every store call in a bounded wait.

pub mod cast_vote;
pub mod config;
pub mod create_feature;
pub mod delete_feature;
pub mod feature_votes;
pub mod get_feature;
pub mod list_features;
pub mod retract_vote;
pub mod update_feature;

// Re-exports
pub use cast_vote::{CastVoteOutput, CastVoteUseCase};
pub use config::VotingConfig;
pub use create_feature::{CreateFeatureUseCase, FeatureInput};
pub use delete_feature::DeleteFeatureUseCase;
pub use feature_votes::{FeatureVotesOutput, FeatureVotesUseCase};
pub use get_feature::GetFeatureUseCase;
pub use list_features::ListFeaturesUseCase;
pub use retract_vote::RetractVoteUseCase;
pub use update_feature::UpdateFeatureUseCase;
