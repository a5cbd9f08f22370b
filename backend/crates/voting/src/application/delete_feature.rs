//! Delete Feature Use Case
//!
//! Votes on the feature go with it (store cascade).

use std::sync::Arc;

use kernel::id::{FeatureId, UserId};
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::repository::FeatureRepository;
use crate::domain::services::is_owner;
use crate::error::{VotingError, VotingResult};

pub struct DeleteFeatureUseCase<F>
where
    F: FeatureRepository,
{
    feature_repo: Arc<F>,
    config: Arc<VotingConfig>,
}

impl<F> DeleteFeatureUseCase<F>
where
    F: FeatureRepository,
{
    pub fn new(feature_repo: Arc<F>, config: Arc<VotingConfig>) -> Self {
        Self {
            feature_repo,
            config,
        }
    }

    pub async fn execute(&self, feature_id: FeatureId, requester: UserId) -> VotingResult<()> {
        let owner = with_timeout(
            self.config.store_timeout,
            self.feature_repo.find_owner(feature_id),
        )
        .await?
        .ok_or(VotingError::FeatureNotFound)?;

        if !is_owner(requester, owner) {
            tracing::warn!(
                feature_id = %feature_id,
                requester = %requester,
                "Refused deletion of another user's feature"
            );
            return Err(VotingError::Forbidden(
                "You can only delete your own features",
            ));
        }

        let deleted = with_timeout(
            self.config.store_timeout,
            self.feature_repo.delete(feature_id),
        )
        .await?;
        if !deleted {
            return Err(VotingError::FeatureNotFound);
        }

        tracing::info!(feature_id = %feature_id, "Feature deleted");

        Ok(())
    }
}
