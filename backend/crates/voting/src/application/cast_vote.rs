//! Cast Vote Use Case
//!
//! The pre-check only saves a round trip for the common case. Two concurrent
//! casts can both pass it; the store's unique constraint then rejects the
//! loser and that rejection becomes `DuplicateVote`.

use std::sync::Arc;

use kernel::id::{FeatureId, UserId};
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::entities::Vote;
use crate::domain::repository::{FeatureRepository, VoteRepository};
use crate::error::{VotingError, VotingResult};

/// The stored vote and the feature's count right after it
#[derive(Debug, Clone)]
pub struct CastVoteOutput {
    pub vote: Vote,
    pub vote_count: i64,
}

pub struct CastVoteUseCase<R>
where
    R: FeatureRepository + VoteRepository,
{
    repo: Arc<R>,
    config: Arc<VotingConfig>,
}

impl<R> CastVoteUseCase<R>
where
    R: FeatureRepository + VoteRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<VotingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        voter: UserId,
        feature_id: FeatureId,
    ) -> VotingResult<CastVoteOutput> {
        let timeout = self.config.store_timeout;

        if with_timeout(timeout, self.repo.find_owner(feature_id))
            .await?
            .is_none()
        {
            return Err(VotingError::FeatureNotFound);
        }

        if with_timeout(timeout, self.repo.has_voted(voter, feature_id)).await? {
            return Err(VotingError::DuplicateVote);
        }

        let vote = match with_timeout(timeout, self.repo.insert_vote(voter, feature_id)).await {
            Ok(vote) => vote,
            Err(e) if e.is_unique_violation() => return Err(VotingError::DuplicateVote),
            // Feature deleted after the existence check
            Err(e) if e.is_foreign_key_violation() => return Err(VotingError::FeatureNotFound),
            Err(e) => return Err(e.into()),
        };

        let vote_count =
            with_timeout(timeout, self.repo.count_votes_for_feature(feature_id)).await?;

        tracing::info!(
            vote_id = %vote.id,
            user_id = %voter,
            feature_id = %feature_id,
            vote_count,
            "Vote cast"
        );

        Ok(CastVoteOutput { vote, vote_count })
    }
}
