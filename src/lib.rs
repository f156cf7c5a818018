//! aniwatch-api - anime metadata proxy and quotes API
//!
//! Serves random and filtered anime quotes from a PostgREST table and
//! forwards `/hianime` requests to an anime scraper, behind a middleware
//! chain of request logging, CORS, cache headers, optional rate limiting and
//! uniform JSON error envelopes.
//!
//! ## Architecture
//!
//! - `config/` - Environment-driven settings, resolved once at startup
//! - `models/` - Quote records, search queries and the response envelope
//! - `services/` - Quote store, scraper seam, rate limiter, health loop
//! - `middleware/` - Cross-cutting request/response processing
//! - `handlers/` - Route handlers and the application factory
//! - `utils/` - Request inspection helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use aniwatch_api::{create_app, AppState, Settings};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let settings = Settings::from_env().map_err(std::io::Error::other)?;
//!     let state = AppState::from_settings(settings).map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind(("0.0.0.0", 4000))?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

/// Prefix of every versioned API route
pub const BASE_PATH: &str = "/api/v2";

pub use config::{
    AllowedOrigins, CachePolicy, ConfigError, CorsConfig, DatabaseConfig, RateLimitConfig,
    Settings,
};
pub use error::ApiError;
pub use handlers::create_app;
pub use models::{Envelope, Quote, QuoteFilter, QuoteSearch};
pub use services::{
    AnimeScraper, HealthLoopState, MemoryQuoteStore, PostgrestQuoteStore, QuoteStore,
    RateLimitDecision, ScraperError, SimpleRateLimiter, StoreError, UnavailableScraper,
    UpstreamScraper, spawn_health_loop,
};
pub use state::{AppState, StartupError};
