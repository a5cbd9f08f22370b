//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, ProfileUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        user_name: req.username,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&output.user),
            token: output.token,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: UserResponse::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(&principal).await?;

    Ok(Json(ProfileResponse {
        user: UserResponse::from(&user),
    }))
}
