//! Quotes endpoint handlers.

use crate::{
    error::ApiError,
    models::{Envelope, QuoteFilter, QuoteSearch},
    services::{pick_random, random_quote, search_quotes},
    state::AppState,
};
use actix_web::{HttpRequest, HttpResponse, web};

const QUOTE_FAILURE: &str = "Failed to fetch quote";
const QUOTES_FAILURE: &str = "Failed to fetch quotes";

/// `GET /quotes`
///
/// Without `character` or `anime` returns one random quote from the whole
/// table. With either filter returns every match in id order, or one random
/// match unwrapped when `single=true`. No match is an empty list, not an
/// error. Repeated parameters keep their first value.
pub async fn get_quotes(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let search = QuoteSearch::from_query(req.query_string());
    let filter = search.filter();
    let store = state.quotes.as_ref();

    if filter.is_empty() {
        let quote = random_quote(store)
            .await
            .map_err(|e| ApiError::upstream(QUOTE_FAILURE, &e))?;
        return Ok(HttpResponse::Ok().json(Envelope::single(quote)));
    }

    let matches = search_quotes(store, &filter)
        .await
        .map_err(|e| ApiError::upstream(QUOTE_FAILURE, &e))?;

    tracing::debug!(
        character = ?filter.character,
        anime = ?filter.anime,
        matches = matches.len(),
        single = search.is_single(),
        "Quote search"
    );

    if search.is_single() {
        if let Some(quote) = pick_random(matches) {
            return Ok(HttpResponse::Ok().json(Envelope::single(quote)));
        }
        return Ok(HttpResponse::Ok().json(Envelope::list(Vec::<()>::new())));
    }

    Ok(HttpResponse::Ok().json(Envelope::list(matches)))
}

/// `GET /quotes/all`
pub async fn get_all_quotes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let quotes = search_quotes(state.quotes.as_ref(), &QuoteFilter::all())
        .await
        .map_err(|e| ApiError::upstream(QUOTES_FAILURE, &e))?;

    Ok(HttpResponse::Ok().json(Envelope::list(quotes)))
}
