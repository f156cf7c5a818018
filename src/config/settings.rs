//! Process-wide settings resolved once at startup.

use super::{
    CachePolicy, ConfigError, CorsConfig, DatabaseConfig, RateLimitConfig, env_lookup, parse_or,
};
use std::path::PathBuf;
use url::Url;

/// Validated application settings
///
/// The deployment flavour is decided here and nowhere else: handlers and
/// middleware read `is_publicly_hosted` / `is_serverless_deployment` instead of
/// probing the environment themselves.
#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Public hostname of this instance, e.g. `api.example.com`
    pub hostname: Option<String>,
    /// A public hostname is configured, so this is not a personal deployment
    pub is_publicly_hosted: bool,
    /// Running under a serverless host that owns the listener
    pub is_serverless_deployment: bool,
    pub database: DatabaseConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub cache: CachePolicy,
    pub static_dir: PathBuf,
    pub scraper_url: Option<Url>,
    pub scraper_package_version: Option<String>,
}

#[cfg(test)]
impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            hostname: None,
            is_publicly_hosted: false,
            is_serverless_deployment: false,
            database: DatabaseConfig::local(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
            cache: CachePolicy::default(),
            static_dir: PathBuf::from("public"),
            scraper_url: None,
            scraper_package_version: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("ANIWATCH_API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(lookup, "ANIWATCH_API_PORT", 4000u16)?;

        let hostname = lookup("ANIWATCH_API_HOSTNAME")
            .map(|h| normalize_hostname(&h))
            .filter(|h| !h.is_empty());

        let is_serverless_deployment = lookup("ANIWATCH_API_VERCEL_DEPLOYMENT")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let scraper_url = match lookup("ANIWATCH_API_SCRAPER_URL") {
            Some(raw) => Some(Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid {
                key: "ANIWATCH_API_SCRAPER_URL",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            host,
            port,
            is_publicly_hosted: hostname.is_some(),
            hostname,
            is_serverless_deployment,
            database: DatabaseConfig::from_lookup(lookup)?,
            rate_limit: RateLimitConfig::from_lookup(lookup)?,
            cors: CorsConfig::from_lookup(lookup)?,
            cache: CachePolicy::from_lookup(lookup)?,
            static_dir: lookup("ANIWATCH_API_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            scraper_url,
            scraper_package_version: lookup("ANIWATCH_PACKAGE_VERSION"),
        })
    }

    /// Whether the self health-check loop should run for this process
    pub fn wants_health_loop(&self) -> bool {
        !self.is_serverless_deployment && self.is_publicly_hosted
    }
}

/// Accepts `api.example.com`, `https://api.example.com/` and similar
fn normalize_hostname(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "" | "0" | "false" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::lookup_from;

    const REQUIRED: [(&str, &str); 2] = [
        ("SUPABASE_URL", "https://xyz.supabase.co"),
        ("SUPABASE_KEY", "anon"),
    ];

    fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        let mut vars = REQUIRED.to_vec();
        vars.extend_from_slice(extra);
        vars
    }

    #[test]
    fn test_personal_deployment_defaults() {
        let settings = Settings::from_lookup(&lookup_from(&REQUIRED)).unwrap();
        assert_eq!(settings.port, 4000);
        assert_eq!(settings.hostname, None);
        assert!(!settings.is_publicly_hosted);
        assert!(!settings.is_serverless_deployment);
        assert!(!settings.wants_health_loop());
        assert!(settings.scraper_url.is_none());
    }

    #[test]
    fn test_hostname_enables_public_mode() {
        let vars = with_required(&[("ANIWATCH_API_HOSTNAME", "https://api.example.com/")]);
        let settings = Settings::from_lookup(&lookup_from(&vars)).unwrap();
        assert_eq!(settings.hostname.as_deref(), Some("api.example.com"));
        assert!(settings.is_publicly_hosted);
        assert!(settings.wants_health_loop());
    }

    #[test]
    fn test_serverless_suppresses_health_loop() {
        let vars = with_required(&[
            ("ANIWATCH_API_HOSTNAME", "api.example.com"),
            ("ANIWATCH_API_VERCEL_DEPLOYMENT", "true"),
        ]);
        let settings = Settings::from_lookup(&lookup_from(&vars)).unwrap();
        assert!(settings.is_serverless_deployment);
        assert!(settings.is_publicly_hosted);
        assert!(!settings.wants_health_loop());

        let vars = with_required(&[("ANIWATCH_API_VERCEL_DEPLOYMENT", "false")]);
        let settings = Settings::from_lookup(&lookup_from(&vars)).unwrap();
        assert!(!settings.is_serverless_deployment);
    }

    #[test]
    fn test_fails_fast_on_missing_database() {
        let err = Settings::from_lookup(&lookup_from(&[("ANIWATCH_API_PORT", "8080")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));
    }

    #[test]
    fn test_fails_fast_on_bad_port() {
        let vars = with_required(&[("ANIWATCH_API_PORT", "eighty")]);
        let err = Settings::from_lookup(&lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ANIWATCH_API_PORT", .. }));
    }

    #[test]
    fn test_scraper_url_is_validated() {
        let vars = with_required(&[("ANIWATCH_API_SCRAPER_URL", "::nope::")]);
        assert!(Settings::from_lookup(&lookup_from(&vars)).is_err());

        let vars = with_required(&[(
            "ANIWATCH_API_SCRAPER_URL",
            "https://scraper.internal/api/v2/hianime",
        )]);
        let settings = Settings::from_lookup(&lookup_from(&vars)).unwrap();
        assert_eq!(
            settings.scraper_url.map(|u| u.to_string()),
            Some("https://scraper.internal/api/v2/hianime".to_string())
        );
    }
}
