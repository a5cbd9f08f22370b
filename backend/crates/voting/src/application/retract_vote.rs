//! Retract Vote Use Case

use std::sync::Arc;

use kernel::id::{FeatureId, UserId};
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::repository::VoteRepository;
use crate::error::{VotingError, VotingResult};

pub struct RetractVoteUseCase<V>
where
    V: VoteRepository,
{
    vote_repo: Arc<V>,
    config: Arc<VotingConfig>,
}

impl<V> RetractVoteUseCase<V>
where
    V: VoteRepository,
{
    pub fn new(vote_repo: Arc<V>, config: Arc<VotingConfig>) -> Self {
        Self { vote_repo, config }
    }

    /// Remove the caller's vote and return the feature's new count
    pub async fn execute(&self, voter: UserId, feature_id: FeatureId) -> VotingResult<i64> {
        let timeout = self.config.store_timeout;

        if !with_timeout(timeout, self.vote_repo.delete_vote(voter, feature_id)).await? {
            return Err(VotingError::VoteNotFound);
        }

        let vote_count =
            with_timeout(timeout, self.vote_repo.count_votes_for_feature(feature_id)).await?;

        tracing::info!(
            user_id = %voter,
            feature_id = %feature_id,
            vote_count,
            "Vote retracted"
        );

        Ok(vote_count)
    }
}
