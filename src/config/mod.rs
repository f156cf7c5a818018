//! Configuration structures and loading utilities.
//!
//! Every concern owns a config struct with a `Default` and a `from_env()`
//! constructor. Loading goes through a lookup function so tests can feed a
//! fixed map instead of mutating the process environment.

pub mod cache;
pub mod cors;
pub mod database;
pub mod rate_limit;
pub mod settings;

pub use cache::*;
pub use cors::*;
pub use database::*;
pub use rate_limit::*;
pub use settings::*;

use std::{env, str::FromStr};

/// Errors raised while resolving configuration at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Reads a variable from the process environment, treating empty values as unset
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional variable, falling back to `default` when unset
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Fetches a variable that must be present
pub(crate) fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or(ConfigError::Missing(key))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    /// Builds a lookup function over a fixed set of variables
    pub fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }
}
