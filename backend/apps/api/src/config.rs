//! Server Configuration
//!
//! Everything is read from the environment once at startup (`.env` is
//! loaded first by `main`).

use std::time::Duration;

use anyhow::{Context, bail};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MIN: u32 = 2;
const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_millis(30_000);
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5_000);
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return Self::Any;
        }
        Self::List(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    /// `None` only in debug builds; a random secret is used then
    pub jwt_secret: Option<Vec<u8>>,
    pub token_ttl: Duration,
    pub password_pepper: Option<Vec<u8>>,
    pub pool_min: u32,
    pub pool_max: u32,
    pub pool_idle_timeout: Duration,
    pub store_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any key lookup; `dev` relaxes the secret requirement
    pub fn from_lookup<F>(lookup: F, dev: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => Some(secret.into_bytes()),
            None if dev => None,
            None => bail!("JWT_SECRET must be set in release builds"),
        };

        let token_ttl = match var("JWT_EXPIRES_IN") {
            Some(raw) => parse_duration(&raw).context("Invalid JWT_EXPIRES_IN")?,
            None => DEFAULT_TOKEN_TTL,
        };

        let pool_min = parse_or(&var, "DB_POOL_MIN", DEFAULT_POOL_MIN)?;
        let pool_max = parse_or(&var, "DB_POOL_MAX", DEFAULT_POOL_MAX)?;
        if pool_min > pool_max {
            bail!("DB_POOL_MIN ({pool_min}) exceeds DB_POOL_MAX ({pool_max})");
        }

        Ok(Self {
            database_url,
            port: parse_or(&var, "PORT", DEFAULT_PORT)?,
            cors_origins: CorsOrigins::parse(&var("CORS_ORIGIN").unwrap_or_else(|| "*".into())),
            jwt_secret,
            token_ttl,
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            pool_min,
            pool_max,
            pool_idle_timeout: parse_millis_or(
                &var,
                "DB_POOL_IDLE_TIMEOUT",
                DEFAULT_POOL_IDLE_TIMEOUT,
            )?,
            store_timeout: parse_millis_or(&var, "STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT)?,
        })
    }

    pub fn auth_config(&self) -> auth::AuthConfig {
        let base = match &self.jwt_secret {
            Some(secret) => auth::AuthConfig {
                token_secret: secret.clone(),
                ..auth::AuthConfig::default()
            },
            None => {
                tracing::warn!("JWT_SECRET not set; using a random secret for this process");
                auth::AuthConfig::development()
            }
        };

        auth::AuthConfig {
            token_ttl: self.token_ttl,
            password_pepper: self.password_pepper.clone(),
            store_timeout: self.store_timeout,
            ..base
        }
    }

    pub fn voting_config(&self) -> voting::VotingConfig {
        voting::VotingConfig::with_store_timeout(self.store_timeout)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("token_ttl", &self.token_ttl)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .field("pool_min", &self.pool_min)
            .field("pool_max", &self.pool_max)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_millis_or<F>(var: &F, key: &str, default: Duration) -> anyhow::Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let ms = parse_or(var, key, default.as_millis() as u64)?;
    if ms == 0 {
        bail!("{key} must be positive");
    }
    Ok(Duration::from_millis(ms))
}

/// Human-readable duration such as `90s`, `15m`, `24h` or `7d`; a bare
/// number is seconds
pub fn parse_duration(raw: &str) -> anyhow::Result<Duration> {
    let raw = raw.trim();
    let duration = match raw.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => humantime::parse_duration(raw)
            .with_context(|| format!("Expected a duration like 24h, got {raw:?}"))?,
    };
    if duration.is_zero() {
        bail!("Duration must be positive: {raw:?}");
    }
    Ok(duration)
}
