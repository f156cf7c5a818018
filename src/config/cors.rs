//! CORS policy configuration.

use super::{ConfigError, env_lookup};

/// Allowed origins for cross-origin requests
#[derive(Clone, Debug, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Configuration for the CORS middleware
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: AllowedOrigins,
    pub max_age_seconds: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: AllowedOrigins::Any,
            max_age_seconds: 600,
        }
    }
}

impl CorsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = match lookup("ANIWATCH_API_CORS_ALLOWED_ORIGINS") {
            None => AllowedOrigins::Any,
            Some(raw) => {
                let origins: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(|o| o.trim_end_matches('/').to_string())
                    .collect();

                if origins.is_empty() || origins.iter().any(|o| o == "*") {
                    AllowedOrigins::Any
                } else {
                    AllowedOrigins::List(origins)
                }
            }
        };

        Ok(Self {
            allowed_origins,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::lookup_from;

    #[test]
    fn test_cors_origin_parsing() {
        let config = CorsConfig::from_lookup(&lookup_from(&[])).unwrap();
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);

        let lookup = lookup_from(&[(
            "ANIWATCH_API_CORS_ALLOWED_ORIGINS",
            "https://a.example, https://b.example/ ,",
        )]);
        let config = CorsConfig::from_lookup(&lookup).unwrap();
        assert_eq!(
            config.allowed_origins,
            AllowedOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );

        let lookup = lookup_from(&[("ANIWATCH_API_CORS_ALLOWED_ORIGINS", "https://a.example,*")]);
        let config = CorsConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);
    }
}
