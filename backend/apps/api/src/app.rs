//! Router Composition
//!
//! Mounts the auth, feature and vote routers under `/api` next to the
//! health check, then applies tracing and CORS.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use voting::domain::repository::{FeatureRepository, VoteRepository};

use crate::config::CorsOrigins;

/// Everything the routers need, independent of the backing store
pub struct AppParts<U, V> {
    pub users: U,
    pub voting: V,
    pub auth_config: Arc<auth::AuthConfig>,
    pub voting_config: Arc<voting::VotingConfig>,
}

pub fn build_router<U, V>(parts: AppParts<U, V>, cors_origins: &CorsOrigins) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    V: FeatureRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let AppParts {
        users,
        voting,
        auth_config,
        voting_config,
    } = parts;

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api/auth",
            auth::auth_router_generic(users, auth_config.clone()),
        )
        .nest(
            "/api/features",
            voting::feature_router_generic(
                voting.clone(),
                voting_config.clone(),
                auth_config.clone(),
            ),
        )
        .nest(
            "/api/votes",
            voting::vote_router_generic(voting, voting_config, auth_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
