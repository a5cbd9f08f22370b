//! HTTP Handlers

use std::sync::Arc;

use auth::Principal;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::FeatureId;

use crate::application::config::VotingConfig;
use crate::application::{
    CastVoteUseCase, CreateFeatureUseCase, DeleteFeatureUseCase, FeatureVotesUseCase,
    GetFeatureUseCase, ListFeaturesUseCase, RetractVoteUseCase, UpdateFeatureUseCase,
};
use crate::domain::repository::{FeatureRepository, VoteRepository};
use crate::error::VotingResult;
use crate::presentation::dto::{
    CastVoteRequest, CastVoteResponse, FeatureDetailResponse, FeatureListResponse,
    FeatureMutationResponse, FeatureRequest, FeatureVotesResponse, MessageResponse,
    RetractVoteResponse,
};

/// Shared state for feature and vote handlers
#[derive(Clone)]
pub struct VotingAppState<R>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<VotingConfig>,
}

// ============================================================================
// Features
// ============================================================================

/// GET /api/features
pub async fn list_features<R>(
    State(state): State<VotingAppState<R>>,
) -> VotingResult<Json<FeatureListResponse>>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let features = ListFeaturesUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;

    Ok(Json(FeatureListResponse {
        features: features.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/features/{id}
pub async fn get_feature<R>(
    State(state): State<VotingAppState<R>>,
    Path(feature_id): Path<FeatureId>,
) -> VotingResult<Json<FeatureDetailResponse>>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let feature = GetFeatureUseCase::new(state.repo.clone(), state.config.clone())
        .execute(feature_id)
        .await?;

    Ok(Json(FeatureDetailResponse {
        feature: feature.into(),
    }))
}

/// POST /api/features
pub async fn create_feature<R>(
    State(state): State<VotingAppState<R>>,
    principal: Principal,
    Json(req): Json<FeatureRequest>,
) -> VotingResult<(StatusCode, Json<FeatureMutationResponse>)>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let feature = CreateFeatureUseCase::new(state.repo.clone(), state.config.clone())
        .execute(principal.user_id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeatureMutationResponse {
            message: "Feature created successfully".to_string(),
            feature: feature.into(),
        }),
    ))
}

/// PUT /api/features/{id}
pub async fn update_feature<R>(
    State(state): State<VotingAppState<R>>,
    principal: Principal,
    Path(feature_id): Path<FeatureId>,
    Json(req): Json<FeatureRequest>,
) -> VotingResult<Json<FeatureMutationResponse>>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let feature = UpdateFeatureUseCase::new(state.repo.clone(), state.config.clone())
        .execute(feature_id, principal.user_id, req.into())
        .await?;

    Ok(Json(FeatureMutationResponse {
        message: "Feature updated successfully".to_string(),
        feature: feature.into(),
    }))
}

/// DELETE /api/features/{id}
pub async fn delete_feature<R>(
    State(state): State<VotingAppState<R>>,
    principal: Principal,
    Path(feature_id): Path<FeatureId>,
) -> VotingResult<Json<MessageResponse>>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    DeleteFeatureUseCase::new(state.repo.clone(), state.config.clone())
        .execute(feature_id, principal.user_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Feature deleted successfully".to_string(),
    }))
}

// ============================================================================
// Votes
// ============================================================================

/// POST /api/votes
pub async fn cast_vote<R>(
    State(state): State<VotingAppState<R>>,
    principal: Principal,
    Json(req): Json<CastVoteRequest>,
) -> VotingResult<(StatusCode, Json<CastVoteResponse>)>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let feature_id = req.feature_id()?;

    let output = CastVoteUseCase::new(state.repo.clone(), state.config.clone())
        .execute(principal.user_id, feature_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CastVoteResponse {
            message: "Vote recorded successfully".to_string(),
            vote: output.vote.into(),
            vote_count: output.vote_count,
        }),
    ))
}

/// DELETE /api/votes/{featureId}
pub async fn retract_vote<R>(
    State(state): State<VotingAppState<R>>,
    principal: Principal,
    Path(feature_id): Path<FeatureId>,
) -> VotingResult<Json<RetractVoteResponse>>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let vote_count = RetractVoteUseCase::new(state.repo.clone(), state.config.clone())
        .execute(principal.user_id, feature_id)
        .await?;

    Ok(Json(RetractVoteResponse {
        message: "Vote removed successfully".to_string(),
        vote_count,
    }))
}

/// GET /api/votes/feature/{featureId}
pub async fn feature_votes<R>(
    State(state): State<VotingAppState<R>>,
    Path(feature_id): Path<FeatureId>,
) -> VotingResult<Json<FeatureVotesResponse>>
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let output = FeatureVotesUseCase::new(state.repo.clone(), state.config.clone())
        .execute(feature_id)
        .await?;

    Ok(Json(FeatureVotesResponse {
        vote_count: output.vote_count,
        votes: output.vote_count,
        voters: output.voters.into_iter().map(Into::into).collect(),
    }))
}
