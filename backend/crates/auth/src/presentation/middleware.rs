//! Auth Middleware
//!
//! Bearer token verification for protected routes. On success the
//! [`Principal`] is stored in request extensions and can be taken by
//! handlers as an extractor.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::{BearerError, extract_bearer_token};
use std::sync::Arc;

use crate::application::VerifyTokenUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::error::AuthError;

/// Middleware that requires a valid bearer token
///
/// Use with `axum::middleware::from_fn_with_state(Arc<AuthConfig>, require_auth)`.
/// Rejects before the inner handler runs, so ownership checks never see an
/// anonymous caller.
pub async fn require_auth(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers())?;

    let principal = VerifyTokenUseCase::new(config).execute(token)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AuthError::MissingToken(BearerError::Missing))
    }
}
