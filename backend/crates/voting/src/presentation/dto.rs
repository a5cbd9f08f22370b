//! API DTOs (Data Transfer Objects)
//!
//! Entity bodies keep their stored snake_case field names; envelope keys
//! (`voteCount`, `voters`) are camelCase.

use chrono::{DateTime, Utc};
use kernel::error::app_error::FieldViolation;
use kernel::id::{FeatureId, UserId, VoteId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::FeatureInput;
use crate::domain::entities::{Feature, Vote, Voter};
use crate::error::{VotingError, VotingResult};

// ============================================================================
// Features
// ============================================================================

/// Create / update request
///
/// Missing fields default to empty so they are reported as field errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeatureRequest {
    pub title: String,
    pub description: String,
}

impl From<FeatureRequest> for FeatureInput {
    fn from(req: FeatureRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureResponse {
    pub id: FeatureId,
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_username: Option<String>,
    pub vote_count: i64,
}

impl From<Feature> for FeatureResponse {
    fn from(feature: Feature) -> Self {
        Self {
            id: feature.id,
            title: feature.title,
            description: feature.description,
            created_by: feature.created_by,
            created_at: feature.created_at,
            updated_at: feature.updated_at,
            created_by_username: feature.created_by_username,
            vote_count: feature.vote_count,
        }
    }
}

/// `GET /api/features`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureListResponse {
    pub features: Vec<FeatureResponse>,
}

/// `GET /api/features/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDetailResponse {
    pub feature: FeatureResponse,
}

/// Create / update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMutationResponse {
    pub message: String,
    pub feature: FeatureResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Votes
// ============================================================================

/// `POST /api/votes` body
///
/// `featureId` is kept raw so a missing or malformed id becomes a field
/// error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CastVoteRequest {
    pub feature_id: Option<Value>,
}

impl CastVoteRequest {
    /// A positive integer, given as a JSON number or numeric string
    pub fn feature_id(&self) -> VotingResult<FeatureId> {
        let id = match &self.feature_id {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match id {
            Some(id) if id > 0 => Ok(FeatureId::from_i64(id)),
            _ => Err(VotingError::Validation(vec![FieldViolation::new(
                "featureId",
                "Valid feature ID is required",
            )])),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResponse {
    pub id: VoteId,
    pub user_id: UserId,
    pub feature_id: FeatureId,
    pub created_at: DateTime<Utc>,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id,
            user_id: vote.user_id,
            feature_id: vote.feature_id,
            created_at: vote.created_at,
        }
    }
}

/// `POST /api/votes` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteResponse {
    pub message: String,
    pub vote: VoteResponse,
    pub vote_count: i64,
}

/// `DELETE /api/votes/{featureId}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetractVoteResponse {
    pub message: String,
    pub vote_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterResponse {
    pub user_id: UserId,
    pub voted_at: DateTime<Utc>,
}

impl From<Voter> for VoterResponse {
    fn from(voter: Voter) -> Self {
        Self {
            user_id: voter.user_id,
            voted_at: voter.voted_at,
        }
    }
}

/// `GET /api/votes/feature/{featureId}` response
///
/// `votes` repeats the count for older clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVotesResponse {
    pub vote_count: i64,
    pub votes: i64,
    pub voters: Vec<VoterResponse>,
}
