//! Anime endpoint group, forwarded to the scraper.

use crate::{error::ApiError, services::ScraperError, state::AppState};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

/// `GET /hianime` and `GET /hianime/{tail:.*}`
///
/// Hands the path below `/hianime` and the raw query string to the scraper
/// and returns its JSON untouched.
pub async fn hianime_proxy(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let tail = req.match_info().get("tail").unwrap_or("");
    let payload = state
        .scraper
        .fetch(tail, req.query_string())
        .await
        .map_err(|e| scraper_error(tail, e))?;

    Ok(HttpResponse::Ok().json(payload))
}

fn scraper_error(path: &str, err: ScraperError) -> ApiError {
    match err {
        ScraperError::Unavailable => ApiError::ScraperUnavailable,
        ScraperError::InvalidPath(_) => ApiError::NotFound,
        ScraperError::Status { status, message } => {
            tracing::warn!(path = %path, status, message = %message, "Scraper returned an error");
            match StatusCode::from_u16(status) {
                Ok(status) if status.is_client_error() => ApiError::Scraper { status, message },
                _ => ApiError::Upstream("Failed to fetch anime data"),
            }
        }
        ScraperError::Request(e) => ApiError::upstream("Failed to fetch anime data", &e),
    }
}
