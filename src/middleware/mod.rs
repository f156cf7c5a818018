//! Middleware chain wrapped around every route.
//!
//! From the outside in: request logging, CORS, cache headers, the optional
//! rate limiter, static assets and error envelope normalization.

pub mod cache_control;
pub mod cors;
pub mod error_envelope;
pub mod logging;
pub mod rate_limit;
pub mod static_files;

pub use cache_control::*;
pub use cors::*;
pub use error_envelope::*;
pub use logging::*;
pub use rate_limit::*;
pub use static_files::*;
