//! Signed Bearer Tokens
//!
//! HS256 JSON Web Tokens carrying a user id and email with an expiry.
//! Verification is stateless: a token is valid iff the signature matches
//! and `exp` is in the future.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: i64,
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Token verification / signing failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token valid for the configured TTL from now
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| TokenError::Signing(format!("Invalid token TTL: {e}")))?;

        let claims = TokenClaims {
            user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret-for-token-signing", Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = signer();
        let token = signer.issue(7, "alice@x.com").unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token() {
        let signer = signer();
        let two_hours_ago = Utc::now() - chrono::Duration::hours(2);
        let token = signer.issue_at(7, "alice@x.com", two_hours_ago).unwrap();

        assert_eq!(signer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = signer().issue(7, "alice@x.com").unwrap();
        let other = TokenSigner::new(b"another-secret", Duration::from_secs(3600));

        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(signer().verify("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(signer().verify(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let signer = signer();
        let token = signer.issue(7, "alice@x.com").unwrap();
        let forged = signer.issue(8, "mallory@x.com").unwrap();

        // Splice the forged payload under the original signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(signer.verify(&spliced), Err(TokenError::Invalid));
    }

    #[test]
    fn test_debug_redaction() {
        let debug = format!("{:?}", signer());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("test-secret"));
    }
}
