//! CORS policy.

use crate::config::{AllowedOrigins, CorsConfig};
use actix_cors::Cors;
use actix_web::http::Method;

/// Builds the CORS middleware for the configured origins
///
/// Only read methods are exposed; preflight `OPTIONS` requests are answered
/// by the middleware itself.
pub fn cors_policy(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_any_header()
        .expose_headers(["x-request-id", "ratelimit-limit", "ratelimit-remaining", "retry-after"])
        .max_age(config.max_age_seconds);

    match &config.allowed_origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
