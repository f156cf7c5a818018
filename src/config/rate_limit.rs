//! Rate limiting configuration.

use super::{ConfigError, env_lookup, parse_or};
use std::time::Duration;

/// Configuration for rate limiting
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 70,
            window: Duration::from_millis(1_800_000), // 30 minutes
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_requests = parse_or(lookup, "ANIWATCH_API_MAX_REQS", defaults.max_requests)?;
        let window_ms = parse_or(
            lookup,
            "ANIWATCH_API_WINDOW_MS",
            defaults.window.as_millis() as u64,
        )?;

        if window_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "ANIWATCH_API_WINDOW_MS",
                value: window_ms.to_string(),
            });
        }

        Ok(Self {
            max_requests,
            window: Duration::from_millis(window_ms),
        })
    }
}
