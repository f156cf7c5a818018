//! Anime scraper seam.
//!
//! The scraper is an external collaborator: this crate forwards `/hianime`
//! requests to it and hands back whatever JSON it produces.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Errors produced while talking to the scraper
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("scraper request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("scraper returned status {status}")]
    Status { status: u16, message: String },

    #[error("scraper is not configured")]
    Unavailable,

    #[error("invalid scraper path: {0}")]
    InvalidPath(String),
}

/// Source of anime and episode metadata
#[async_trait]
pub trait AnimeScraper: Send + Sync {
    /// Resolves `path` (relative to `/hianime`) with the raw query string
    async fn fetch(&self, path: &str, query: &str) -> Result<serde_json::Value, ScraperError>;

    /// Version of the scraping package, when known
    fn package_version(&self) -> Option<String> {
        None
    }
}

/// Forwards requests to a running scraper service over HTTP
pub struct UpstreamScraper {
    client: Client,
    base_url: Url,
    package_version: Option<String>,
}

impl UpstreamScraper {
    pub fn new(base_url: Url, package_version: Option<String>) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url,
            package_version,
        })
    }

    /// Joins `path` onto the base URL without letting it escape the base
    pub fn target_url(&self, path: &str, query: &str) -> Result<Url, ScraperError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ScraperError::InvalidPath(path.to_string()))?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                if segment == ".." || segment == "." {
                    return Err(ScraperError::InvalidPath(path.to_string()));
                }
                segments.push(segment);
            }
        }
        url.set_query((!query.is_empty()).then_some(query));
        Ok(url)
    }
}

#[async_trait]
impl AnimeScraper for UpstreamScraper {
    async fn fetch(&self, path: &str, query: &str) -> Result<serde_json::Value, ScraperError> {
        let url = self.target_url(path, query)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Upstream error")
                        .to_string()
                });
            return Err(ScraperError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn package_version(&self) -> Option<String> {
        self.package_version.clone()
    }
}

/// Stand-in used when no scraper is configured
pub struct UnavailableScraper;

#[async_trait]
impl AnimeScraper for UnavailableScraper {
    async fn fetch(&self, _path: &str, _query: &str) -> Result<serde_json::Value, ScraperError> {
        Err(ScraperError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper(base: &str) -> UpstreamScraper {
        UpstreamScraper::new(Url::parse(base).unwrap(), Some("2.24.0".to_string())).unwrap()
    }

    #[test]
    fn test_target_url_joins_segments() {
        let scraper = scraper("https://scraper.internal/api/v2/hianime");
        let url = scraper.target_url("anime/one-piece-100", "").unwrap();
        assert_eq!(
            url.as_str(),
            "https://scraper.internal/api/v2/hianime/anime/one-piece-100"
        );

        let url = scraper.target_url("/search/", "q=titan&page=2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://scraper.internal/api/v2/hianime/search?q=titan&page=2"
        );
    }

    #[test]
    fn test_target_url_rejects_traversal() {
        let scraper = scraper("https://scraper.internal/hianime/");
        assert!(matches!(
            scraper.target_url("../admin", ""),
            Err(ScraperError::InvalidPath(_))
        ));
    }

    #[actix_web::test]
    async fn test_unavailable_scraper() {
        let result = UnavailableScraper.fetch("home", "").await;
        assert!(matches!(result, Err(ScraperError::Unavailable)));
        assert_eq!(UnavailableScraper.package_version(), None);
        assert_eq!(scraper("https://s.example").package_version().as_deref(), Some("2.24.0"));
    }
}
