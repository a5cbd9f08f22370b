//! Feature Votes Use Case
//!
//! Count and voter list for one feature. An unknown feature is not an
//! error: it simply has no votes.

use std::sync::Arc;

use kernel::id::FeatureId;
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::entities::Voter;
use crate::domain::repository::VoteRepository;
use crate::error::VotingResult;

#[derive(Debug, Clone)]
pub struct FeatureVotesOutput {
    pub vote_count: i64,
    /// Earliest vote first
    pub voters: Vec<Voter>,
}

pub struct FeatureVotesUseCase<V>
where
    V: VoteRepository,
{
    vote_repo: Arc<V>,
    config: Arc<VotingConfig>,
}

impl<V> FeatureVotesUseCase<V>
where
    V: VoteRepository,
{
    pub fn new(vote_repo: Arc<V>, config: Arc<VotingConfig>) -> Self {
        Self { vote_repo, config }
    }

    pub async fn execute(&self, feature_id: FeatureId) -> VotingResult<FeatureVotesOutput> {
        let timeout = self.config.store_timeout;

        let vote_count =
            with_timeout(timeout, self.vote_repo.count_votes_for_feature(feature_id)).await?;
        let voters = with_timeout(timeout, self.vote_repo.find_voters(feature_id)).await?;

        Ok(FeatureVotesOutput { vote_count, voters })
    }
}
