//! Feature and Vote Routers
//!
//! Reads are public. Every mutation sits behind `auth::middleware::require_auth`,
//! so an anonymous caller is rejected before any ownership check runs.

use std::sync::Arc;

use auth::AuthConfig;
use auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::application::config::VotingConfig;
use crate::domain::repository::{FeatureRepository, VoteRepository};
use crate::infra::postgres::PgVotingRepository;
use crate::presentation::handlers::{self, VotingAppState};

/// Create the Feature router with PostgreSQL repository
pub fn feature_router(
    repo: PgVotingRepository,
    config: Arc<VotingConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router {
    feature_router_generic(repo, config, auth_config)
}

/// Create a generic Feature router for any repository implementation
pub fn feature_router_generic<R>(
    repo: R,
    config: Arc<VotingConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let state = VotingAppState {
        repo: Arc::new(repo),
        config,
    };

    let protected = Router::new()
        .route("/", post(handlers::create_feature::<R>))
        .route(
            "/{id}",
            put(handlers::update_feature::<R>)
                .delete(handlers::delete_feature::<R>),
        )
        .route_layer(middleware::from_fn_with_state(auth_config, require_auth));

    Router::new()
        .route("/", get(handlers::list_features::<R>))
        .route("/{id}", get(handlers::get_feature::<R>))
        .merge(protected)
        .with_state(state)
}

/// Create the Vote router with PostgreSQL repository
pub fn vote_router(
    repo: PgVotingRepository,
    config: Arc<VotingConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router {
    vote_router_generic(repo, config, auth_config)
}

/// Create a generic Vote router for any repository implementation
pub fn vote_router_generic<R>(
    repo: R,
    config: Arc<VotingConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    R: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let state = VotingAppState {
        repo: Arc::new(repo),
        config,
    };

    let protected = Router::new()
        .route("/", post(handlers::cast_vote::<R>))
        .route("/{feature_id}", delete(handlers::retract_vote::<R>))
        .route_layer(middleware::from_fn_with_state(auth_config, require_auth));

    Router::new()
        .route("/feature/{feature_id}", get(handlers::feature_votes::<R>))
        .merge(protected)
        .with_state(state)
}
