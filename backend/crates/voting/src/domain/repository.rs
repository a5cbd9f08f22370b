//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every call reports failures in the shared store taxonomy.

use kernel::id::{FeatureId, UserId};
use kernel::store::StoreResult;

use crate::domain::entities::{Feature, FeatureChanges, NewFeature, Vote, Voter};

/// Feature repository trait
#[trait_variant::make(FeatureRepository: Send)]
pub trait LocalFeatureRepository {
    /// All features with live vote counts, in listing order
    async fn list_with_votes(&self) -> StoreResult<Vec<Feature>>;

    /// One feature with its live vote count
    async fn find_with_votes(&self, id: FeatureId) -> StoreResult<Option<Feature>>;

    /// Current creator of a feature, straight from the store
    async fn find_owner(&self, id: FeatureId) -> StoreResult<Option<UserId>>;

    /// Insert a new feature; the creator must exist
    async fn create(&self, feature: &NewFeature) -> StoreResult<Feature>;

    /// Replace title and description; `None` if the feature is gone
    async fn update(
        &self,
        id: FeatureId,
        changes: &FeatureChanges,
    ) -> StoreResult<Option<Feature>>;

    /// Delete a feature and, by cascade, its votes; `false` if absent
    async fn delete(&self, id: FeatureId) -> StoreResult<bool>;
}

/// Vote ledger trait
#[trait_variant::make(VoteRepository: Send)]
pub trait LocalVoteRepository {
    /// Insert a vote
    ///
    /// Fails with a unique violation if the pair already voted and with a
    /// foreign-key violation if the feature or user does not exist.
    async fn insert_vote(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<Vote>;

    /// Remove a vote; `false` if there was none
    async fn delete_vote(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<bool>;

    /// Live count; 0 for a feature with no votes or no row at all
    async fn count_votes_for_feature(&self, feature_id: FeatureId) -> StoreResult<i64>;

    async fn has_voted(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<bool>;

    /// Voters in the order they voted
    async fn find_voters(&self, feature_id: FeatureId) -> StoreResult<Vec<Voter>>;
}
