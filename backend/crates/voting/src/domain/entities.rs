//! Domain Entities
//!
//! Core business entities for the voting domain.

use chrono::{DateTime, Utc};
use kernel::id::{FeatureId, UserId, VoteId};

use crate::domain::value_objects::{FeatureDescription, FeatureTitle};

/// Feature entity - a proposal together with its live vote count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub id: FeatureId,
    pub title: String,
    pub description: String,
    /// Creator; never changes after creation
    pub created_by: UserId,
    pub created_by_username: Option<String>,
    /// Live count of votes referencing this feature
    pub vote_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A feature about to be inserted
#[derive(Debug, Clone)]
pub struct NewFeature {
    pub title: FeatureTitle,
    pub description: FeatureDescription,
    pub created_by: UserId,
}

/// Replacement title and description for an existing feature
#[derive(Debug, Clone)]
pub struct FeatureChanges {
    pub title: FeatureTitle,
    pub description: FeatureDescription,
}

/// Vote entity - one user's endorsement of one feature
///
/// Unique per (user_id, feature_id). Created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub feature_id: FeatureId,
    pub created_at: DateTime<Utc>,
}

/// Who voted for a feature, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pub user_id: UserId,
    pub voted_at: DateTime<Utc>,
}

impl From<&Vote> for Voter {
    fn from(vote: &Vote) -> Self {
        Self {
            user_id: vote.user_id,
            voted_at: vote.created_at,
        }
    }
}
