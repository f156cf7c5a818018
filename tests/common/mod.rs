//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

use aniwatch_api::{
    AnimeScraper, AppState, MemoryQuoteStore, Quote, QuoteFilter, QuoteStore, ScraperError,
    Settings, StoreError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub fn quote(id: i64, character: &str, anime: &str) -> Quote {
    Quote {
        id,
        anime: anime.to_string(),
        character: character.to_string(),
        quote: format!("quote #{id}"),
    }
}

pub fn sample_quotes() -> Vec<Quote> {
    vec![
        quote(1, "Naruto Uzumaki", "Naruto"),
        quote(2, "Itachi Uchiha", "Naruto"),
        quote(3, "Levi Ackerman", "Attack on Titan"),
    ]
}

/// Settings for a personal deployment without a static directory
pub fn test_settings() -> Settings {
    Settings::from_lookup(&|key: &str| {
        let value = match key {
            "SUPABASE_URL" => "http://127.0.0.1:54321",
            "SUPABASE_KEY" => "anon",
            "ANIWATCH_API_STATIC_DIR" => "does-not-exist",
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("test settings are valid")
}

pub fn state_with(settings: Settings, quotes: Vec<Quote>) -> AppState {
    AppState::new(
        settings,
        Arc::new(MemoryQuoteStore::new(quotes)),
        Arc::new(StubScraper),
    )
}

pub fn default_state() -> AppState {
    state_with(test_settings(), sample_quotes())
}

/// Store whose every call fails like an unreachable database
pub struct FailingStore;

#[async_trait]
impl QuoteStore for FailingStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::Status {
            status: 503,
            body: "connection refused".to_string(),
        })
    }

    async fn fetch_at(&self, _offset: u64) -> Result<Option<Quote>, StoreError> {
        Err(StoreError::MissingCount)
    }

    async fn search(&self, _filter: &QuoteFilter) -> Result<Vec<Quote>, StoreError> {
        Err(StoreError::Status {
            status: 500,
            body: "relation \"kartun\" does not exist".to_string(),
        })
    }
}

/// Scraper that echoes the request and knows one missing anime
pub struct StubScraper;

#[async_trait]
impl AnimeScraper for StubScraper {
    async fn fetch(&self, path: &str, query: &str) -> Result<serde_json::Value, ScraperError> {
        match path {
            "anime/missing-id" => Err(ScraperError::Status {
                status: 404,
                message: "Anime not found".to_string(),
            }),
            "broken" => Err(ScraperError::Status {
                status: 500,
                message: "selector changed".to_string(),
            }),
            _ => Ok(serde_json::json!({
                "success": true,
                "data": { "path": path, "query": query }
            })),
        }
    }

    fn package_version(&self) -> Option<String> {
        Some("2.4.1".to_string())
    }
}
