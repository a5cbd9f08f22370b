//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::TokenSigner;

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Default upper bound on a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for bearer tokens
    pub token_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Bounded wait for each store call
    pub store_timeout: Duration,
}

impl Default for AuthConfig {
    /// Defaults with a fresh random token secret; never a fixed key
    fn default() -> Self {
        Self::with_random_secret()
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Signer bound to this config's secret and TTL
    pub fn token_signer(&self) -> TokenSigner {
        TokenSigner::new(&self.token_secret, self.token_ttl)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}
