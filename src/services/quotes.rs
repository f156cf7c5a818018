//! Quote selection on top of a [`QuoteStore`].

use crate::{
    models::{Quote, QuoteFilter},
    services::quote_store::{QuoteStore, StoreError},
};
use rand::Rng;

/// Picks one row uniformly at random from the whole table
///
/// Counts the rows, draws an offset in `[0, count)` and fetches that single
/// row. An empty table is an error, not an empty result.
pub async fn random_quote(store: &dyn QuoteStore) -> Result<Quote, StoreError> {
    let count = store.count().await?;
    if count == 0 {
        return Err(StoreError::Empty);
    }

    let offset = rand::rng().random_range(0..count);
    store
        .fetch_at(offset)
        .await?
        .ok_or(StoreError::MissingRow(offset))
}

/// All rows matching `filter`, ascending by id
pub async fn search_quotes(
    store: &dyn QuoteStore,
    filter: &QuoteFilter,
) -> Result<Vec<Quote>, StoreError> {
    store.search(filter).await
}

/// Removes and returns a uniformly chosen element
pub fn pick_random<T>(mut items: Vec<T>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..items.len());
    Some(items.swap_remove(index))
}
