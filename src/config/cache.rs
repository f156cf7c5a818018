//! Cache-Control policy table.
//!
//! Routes are matched on the request path with the API base path removed, so
//! `/api/v2/hianime/home` and a bare `/hianime/home` resolve to the same rule.

use super::{ConfigError, env_lookup, parse_or};

/// A single prefix to directive mapping
#[derive(Clone, Debug, PartialEq)]
pub struct CacheRule {
    pub prefix: String,
    pub directive: String,
}

impl CacheRule {
    pub fn new(prefix: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            directive: directive.into(),
        }
    }
}

/// Per-route cache directives applied by the cache-control middleware
#[derive(Clone, Debug)]
pub struct CachePolicy {
    pub base_path: String,
    pub rules: Vec<CacheRule>,
    pub default_directive: String,
    pub error_directive: String,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::with_default_ttl(60, 30)
    }
}

impl CachePolicy {
    /// Default table with the fallback directive built from the given TTLs
    pub fn with_default_ttl(s_maxage: u64, stale_while_revalidate: u64) -> Self {
        Self {
            base_path: crate::BASE_PATH.to_string(),
            rules: vec![
                CacheRule::new("/health", "no-cache"),
                CacheRule::new("/v", "public, max-age=300"),
                CacheRule::new(
                    "/hianime/anime/",
                    "public, s-maxage=3600, stale-while-revalidate=600",
                ),
                CacheRule::new(
                    "/hianime/search",
                    "public, s-maxage=60, stale-while-revalidate=30",
                ),
                CacheRule::new(
                    "/hianime/",
                    "public, s-maxage=600, stale-while-revalidate=120",
                ),
                CacheRule::new("/quotes", "no-store"),
            ],
            default_directive: format!(
                "public, s-maxage={s_maxage}, stale-while-revalidate={stale_while_revalidate}"
            ),
            error_directive: "no-store".to_string(),
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let s_maxage = parse_or(lookup, "ANIWATCH_API_S_MAXAGE", 60u64)?;
        let stale = parse_or(lookup, "ANIWATCH_API_STALE_WHILE_REVALIDATE", 30u64)?;
        Ok(Self::with_default_ttl(s_maxage, stale))
    }

    /// Strips the base path from `path`, leaving paths outside it untouched
    pub fn route_key<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(self.base_path.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Directive for a successful response to `path`
    pub fn directive_for(&self, path: &str) -> &str {
        let key = self.route_key(path);

        self.rules
            .iter()
            .filter(|rule| matches_prefix(key, &rule.prefix))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| rule.directive.as_str())
            .unwrap_or(&self.default_directive)
    }
}

/// Prefix match that does not let `/v` claim `/version`
fn matches_prefix(key: &str, prefix: &str) -> bool {
    if prefix.ends_with('/') {
        return key.starts_with(prefix) || key == prefix.trim_end_matches('/');
    }
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}
