//! Get Feature Use Case

use std::sync::Arc;

use kernel::id::FeatureId;
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::entities::Feature;
use crate::domain::repository::FeatureRepository;
use crate::error::{VotingError, VotingResult};

pub struct GetFeatureUseCase<F>
where
    F: FeatureRepository,
{
    feature_repo: Arc<F>,
    config: Arc<VotingConfig>,
}

impl<F> GetFeatureUseCase<F>
where
    F: FeatureRepository,
{
    pub fn new(feature_repo: Arc<F>, config: Arc<VotingConfig>) -> Self {
        Self {
            feature_repo,
            config,
        }
    }

    pub async fn execute(&self, feature_id: FeatureId) -> VotingResult<Feature> {
        with_timeout(
            self.config.store_timeout,
            self.feature_repo.find_with_votes(feature_id),
        )
        .await?
        .ok_or(VotingError::FeatureNotFound)
    }
}
