//! API error type and its JSON rendering.

use crate::models::Envelope;
use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header},
};

/// Errors a handler or middleware can return to the client
///
/// The display text is what ends up in the envelope's `error` field, so it
/// must never carry upstream details. Causes are logged where the error is
/// built.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Upstream(&'static str),

    #[error("Not Found")]
    NotFound,

    #[error("Too many requests, please try again later.")]
    RateLimited { retry_after_secs: u64 },

    #[error("{message}")]
    Scraper { status: StatusCode, message: String },

    #[error("Anime scraper is not configured")]
    ScraperUnavailable,
}

impl ApiError {
    /// Logs `cause` and hides it behind a generic upstream failure message
    pub fn upstream(message: &'static str, cause: &dyn std::error::Error) -> Self {
        tracing::error!(error = %cause, "{}", message);
        ApiError::Upstream(message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Scraper { status, .. } => *status,
            ApiError::ScraperUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let ApiError::RateLimited { retry_after_secs } = self {
            response.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
        }
        response.json(Envelope::failure(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_upstream_hides_cause() {
        let cause = std::io::Error::other("connection reset by peer");
        let (status, body) = body_json(ApiError::upstream("Failed to fetch quote", &cause)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "Failed to fetch quote"})
        );
    }

    #[actix_web::test]
    async fn test_scraper_status_is_preserved() {
        let err = ApiError::Scraper {
            status: StatusCode::BAD_REQUEST,
            message: "invalid page number".to_string(),
        };
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid page number");
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = ApiError::RateLimited { retry_after_secs: 42 }.error_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("retry-after").unwrap(), "42");
    }
}
