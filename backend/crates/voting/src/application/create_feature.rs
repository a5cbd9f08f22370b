//! Create Feature Use Case
//!
//! Validates title and description, then stores the feature under the
//! authenticated caller. A new feature always starts with zero votes.

use std::sync::Arc;

use kernel::error::app_error::FieldViolation;
use kernel::id::UserId;
use kernel::store::with_timeout;

use crate::application::config::VotingConfig;
use crate::domain::entities::{Feature, FeatureChanges, NewFeature};
use crate::domain::repository::FeatureRepository;
use crate::domain::value_objects::{FeatureDescription, FeatureTitle};
use crate::error::{VotingError, VotingResult};

/// Raw title and description as submitted (create and update)
#[derive(Debug, Clone)]
pub struct FeatureInput {
    pub title: String,
    pub description: String,
}

impl FeatureInput {
    /// Validate both fields, reporting all violations at once
    pub(crate) fn validate(self) -> VotingResult<FeatureChanges> {
        let mut violations = Vec::new();

        let title = match FeatureTitle::new(&self.title) {
            Ok(v) => Some(v),
            Err(e) => {
                violations.push(FieldViolation::new("title", e.to_string()));
                None
            }
        };

        let description = match FeatureDescription::new(&self.description) {
            Ok(v) => Some(v),
            Err(e) => {
                violations.push(FieldViolation::new("description", e.to_string()));
                None
            }
        };

        match (title, description) {
            (Some(title), Some(description)) => Ok(FeatureChanges { title, description }),
            _ => Err(VotingError::Validation(violations)),
        }
    }
}

pub struct CreateFeatureUseCase<F>
where
    F: FeatureRepository,
{
    feature_repo: Arc<F>,
    config: Arc<VotingConfig>,
}

impl<F> CreateFeatureUseCase<F>
where
    F: FeatureRepository,
{
    pub fn new(feature_repo: Arc<F>, config: Arc<VotingConfig>) -> Self {
        Self {
            feature_repo,
            config,
        }
    }

    pub async fn execute(&self, owner: UserId, input: FeatureInput) -> VotingResult<Feature> {
        let FeatureChanges { title, description } = input.validate()?;

        let new_feature = NewFeature {
            title,
            description,
            created_by: owner,
        };

        let feature = with_timeout(
            self.config.store_timeout,
            self.feature_repo.create(&new_feature),
        )
        .await?;

        tracing::info!(
            feature_id = %feature.id,
            created_by = %feature.created_by,
            "Feature created"
        );

        Ok(feature)
    }
}
