//! Bearer Token Extraction
//!
//! Parses `Authorization: Bearer <token>` request headers.

use http::{HeaderMap, header};

/// Why a request carried no usable bearer token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("No authorization header provided")]
    Missing,

    #[error("Invalid authorization format. Use: Bearer <token>")]
    Malformed,
}

/// Extract the token from an `Authorization` header
///
/// The header must consist of exactly two space-separated parts, the
/// first being the literal scheme `Bearer`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
