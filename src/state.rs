//! Shared application state injected into handlers.

use crate::{
    config::{ConfigError, Settings},
    services::{
        AnimeScraper, PostgrestQuoteStore, QuoteStore, ScraperError, SimpleRateLimiter,
        StoreError, UnavailableScraper, UpstreamScraper,
    },
};
use std::sync::Arc;

/// Errors that stop the process before it starts serving
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not build quote store: {0}")]
    Store(#[from] StoreError),

    #[error("could not build scraper client: {0}")]
    Scraper(#[from] ScraperError),
}

/// Everything a request handler may need
///
/// Built once by the entrypoint and cloned into each worker; the clients and
/// the rate limiter counters are shared, not copied.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub quotes: Arc<dyn QuoteStore>,
    pub scraper: Arc<dyn AnimeScraper>,
    pub limiter: SimpleRateLimiter,
}

impl AppState {
    pub fn new(
        settings: Settings,
        quotes: Arc<dyn QuoteStore>,
        scraper: Arc<dyn AnimeScraper>,
    ) -> Self {
        let limiter = SimpleRateLimiter::new(settings.rate_limit.clone());
        Self {
            settings: Arc::new(settings),
            quotes,
            scraper,
            limiter,
        }
    }

    /// Production wiring: PostgREST quote store and the configured scraper
    pub fn from_settings(settings: Settings) -> Result<Self, StartupError> {
        let quotes: Arc<dyn QuoteStore> = Arc::new(PostgrestQuoteStore::new(&settings.database)?);

        let scraper: Arc<dyn AnimeScraper> = match &settings.scraper_url {
            Some(url) => Arc::new(UpstreamScraper::new(
                url.clone(),
                settings.scraper_package_version.clone(),
            )?),
            None => {
                tracing::warn!("ANIWATCH_API_SCRAPER_URL not set; /hianime routes will answer 503");
                Arc::new(UnavailableScraper)
            }
        };

        Ok(Self::new(settings, quotes, scraper))
    }
}
