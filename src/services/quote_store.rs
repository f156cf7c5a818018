//! Read-only access to the quotes table.
//!
//! The store is the seam between the handlers and the managed database.
//! Production talks to the PostgREST surface of the database over HTTP; tests
//! and local runs use the in-memory implementation.

use crate::{
    config::DatabaseConfig,
    models::{Quote, QuoteFilter},
};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderValue},
};
use std::time::Duration;
use url::Url;

const QUOTE_COLUMNS: &str = "id,anime,character,quote";

/// Errors produced by a quote store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("database returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("database response is missing a usable Content-Range header")]
    MissingCount,

    #[error("No quotes found")]
    Empty,

    #[error("No quote found at offset {0}")]
    MissingRow(u64),

    #[error("invalid database url: {0}")]
    InvalidUrl(String),

    #[error("database api key is not a valid header value")]
    InvalidKey,
}

/// Query executor for the quotes table
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Total number of rows
    async fn count(&self) -> Result<u64, StoreError>;

    /// The row at `offset` in ascending id order, if any
    async fn fetch_at(&self, offset: u64) -> Result<Option<Quote>, StoreError>;

    /// Every row matching `filter`, ascending by id
    async fn search(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, StoreError>;
}

/// Quote store backed by a PostgREST endpoint (Supabase)
pub struct PostgrestQuoteStore {
    client: Client,
    table_url: Url,
}

impl PostgrestQuoteStore {
    pub fn new(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut table_url = config.url.clone();
        table_url
            .path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(config.url.to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", config.table.as_str()]);

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::InvalidKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::InvalidKey)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(3))
            .build()?;

        Ok(Self { client, table_url })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    async fn select(&self, params: &[(&str, String)]) -> Result<Vec<Quote>, StoreError> {
        let response = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", QUOTE_COLUMNS), ("order", "id.asc")])
            .query(params)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json::<Vec<Quote>>().await?)
    }
}

#[async_trait]
impl QuoteStore for PostgrestQuoteStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let response = self
            .client
            .head(self.table_url.clone())
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let response = ensure_success(response).await?;
        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or(StoreError::MissingCount)
    }

    async fn fetch_at(&self, offset: u64) -> Result<Option<Quote>, StoreError> {
        let rows = self
            .select(&[("offset", offset.to_string()), ("limit", "1".to_string())])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn search(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, StoreError> {
        let mut params = Vec::new();
        if let Some(character) = &filter.character {
            params.push(("character", ilike(character)));
        }
        if let Some(anime) = &filter.anime {
            params.push(("anime", ilike(anime)));
        }
        self.select(&params).await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

/// PostgREST `ilike` operator with `*` wildcards on both sides
fn ilike(value: &str) -> String {
    format!("ilike.*{value}*")
}

/// Extracts the total from `0-24/3573` or `*/3573`
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

/// In-memory quote store
#[derive(Clone, Debug, Default)]
pub struct MemoryQuoteStore {
    quotes: Vec<Quote>,
}

impl MemoryQuoteStore {
    pub fn new(mut quotes: Vec<Quote>) -> Self {
        quotes.sort_by_key(|q| q.id);
        Self { quotes }
    }
}

#[async_trait]
impl QuoteStore for MemoryQuoteStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.quotes.len() as u64)
    }

    async fn fetch_at(&self, offset: u64) -> Result<Option<Quote>, StoreError> {
        let Ok(index) = usize::try_from(offset) else {
            return Ok(None);
        };
        Ok(self.quotes.get(index).cloned())
    }

    async fn search(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, StoreError> {
        Ok(self
            .quotes
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }
}
