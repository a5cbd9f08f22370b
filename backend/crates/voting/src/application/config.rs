//! Application Configuration
//!
//! Configuration for the Voting application layer.

use std::time::Duration;

/// Default upper bound on a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Voting application configuration
#[derive(Debug, Clone)]
pub struct VotingConfig {
    /// Bounded wait for each store call
    pub store_timeout: Duration,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl VotingConfig {
    pub fn with_store_timeout(store_timeout: Duration) -> Self {
        Self { store_timeout }
    }
}
