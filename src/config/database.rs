//! Quote database connection settings.

use super::{ConfigError, env_lookup, require};
use url::Url;

/// Connection details for the PostgREST endpoint backing the quotes table
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Url,
    pub api_key: String,
    pub table: String,
}

impl DatabaseConfig {
    /// Load configuration from environment variables; URL and key are required
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = require(lookup, "SUPABASE_URL")?;
        let url = Url::parse(raw_url.trim()).map_err(|_| ConfigError::Invalid {
            key: "SUPABASE_URL",
            value: raw_url.clone(),
        })?;

        let api_key = require(lookup, "SUPABASE_KEY")?;
        let table = lookup("QUOTES_TABLE").unwrap_or_else(|| "kartun".to_string());

        Ok(Self {
            url,
            api_key,
            table,
        })
    }

    /// Settings pointing at a local PostgREST instance
    #[cfg(test)]
    pub(crate) fn local() -> Self {
        Self {
            url: Url::parse("http://127.0.0.1:54321").expect("static url is valid"),
            api_key: String::new(),
            table: "kartun".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::lookup_from;

    #[test]
    fn test_database_requires_url_and_key() {
        let err = DatabaseConfig::from_lookup(&lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));

        let lookup = lookup_from(&[("SUPABASE_URL", "https://xyz.supabase.co")]);
        let err = DatabaseConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_KEY")));
    }

    #[test]
    fn test_database_rejects_bad_url() {
        let lookup = lookup_from(&[("SUPABASE_URL", "not a url"), ("SUPABASE_KEY", "k")]);
        assert!(matches!(
            DatabaseConfig::from_lookup(&lookup),
            Err(ConfigError::Invalid { key: "SUPABASE_URL", .. })
        ));
    }

    #[test]
    fn test_local_config_points_at_loopback() {
        let config = DatabaseConfig::local();
        assert_eq!(config.url.as_str(), "http://127.0.0.1:54321/");
        assert_eq!(config.table, "kartun");
    }

    #[test]
    fn test_database_table_default() {
        let lookup = lookup_from(&[
            ("SUPABASE_URL", "https://xyz.supabase.co"),
            ("SUPABASE_KEY", "anon"),
        ]);
        let config = DatabaseConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.table, "kartun");
        assert_eq!(config.api_key, "anon");
        assert_eq!(config.url.host_str(), Some("xyz.supabase.co"));
    }
}
