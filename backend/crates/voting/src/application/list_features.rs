//! List Features Use Case

use std::sync::Arc;

use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::entities::Feature;
use crate::domain::repository::FeatureRepository;
use crate::error::VotingResult;

/// All features with live counts, most voted first
pub struct ListFeaturesUseCase<F>
where
    F: FeatureRepository,
{
    feature_repo: Arc<F>,
    config: Arc<VotingConfig>,
}

impl<F> ListFeaturesUseCase<F>
where
    F: FeatureRepository,
{
    pub fn new(feature_repo: Arc<F>, config: Arc<VotingConfig>) -> Self {
        Self {
            feature_repo,
            config,
        }
    }

    pub async fn execute(&self) -> VotingResult<Vec<Feature>> {
        let features =
            with_timeout(self.config.store_timeout, self.feature_repo.list_with_votes()).await?;
        Ok(features)
    }
}
