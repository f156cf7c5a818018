//! Plain text endpoints outside the quote and anime groups.

use crate::state::AppState;
use actix_web::{HttpResponse, web};

/// `GET /health` liveness token
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("daijoubu")
}

/// `GET /v` API and scraper package versions
pub async fn version(state: web::Data<AppState>) -> HttpResponse {
    let package = state
        .scraper
        .package_version()
        .or_else(|| state.settings.scraper_package_version.clone())
        .unwrap_or_else(|| "-1".to_string());

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(version_text(env!("CARGO_PKG_VERSION"), &package))
}

fn version_text(api_version: &str, package_version: &str) -> String {
    format!("aniwatch-api: v{api_version}\naniwatch-package: v{package_version}")
}

/// `GET /anicrush` placeholder
pub async fn anicrush() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Anicrush could be implemented in future.")
}
