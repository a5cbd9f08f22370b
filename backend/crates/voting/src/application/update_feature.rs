//! Update Feature Use Case
//!
//! Order of checks: payload, existence, ownership, write.

use std::sync::Arc;

use kernel::id::{FeatureId, UserId};
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::application::create_feature::FeatureInput;
use crate::domain::entities::Feature;
use crate::domain::repository::FeatureRepository;
use crate::domain::services::is_owner;
use crate::error::{VotingError, VotingResult};

pub struct UpdateFeatureUseCase<F>
where
    F: FeatureRepository,
{
    feature_repo: Arc<F>,
    config: Arc<VotingConfig>,
}

impl<F> UpdateFeatureUseCase<F>
where
    F: FeatureRepository,
{
    pub fn new(feature_repo: Arc<F>, config: Arc<VotingConfig>) -> Self {
        Self {
            feature_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        feature_id: FeatureId,
        requester: UserId,
        input: FeatureInput,
    ) -> VotingResult<Feature> {
        let changes = input.validate()?;

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
                "Refused update of another user's feature"
            );
            return Err(VotingError::Forbidden(
                "You can only update your own features",
            ));
        }

        // The feature can disappear between the ownership read and the write
        let feature = with_timeout(
            self.config.store_timeout,
            self.feature_repo.update(feature_id, &changes),
        )
        .await?
        .ok_or(VotingError::FeatureNotFound)?;

        tracing::info!(feature_id = %feature.id, "Feature updated");

        Ok(feature)
    }
}
