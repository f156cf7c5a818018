//! Fallback for requests that match no route.

use crate::error::ApiError;

/// Default service: uniform 404 envelope
pub async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
