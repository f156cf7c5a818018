//! Quote records and the search query that selects them.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A single row of the quotes table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub anime: String,
    pub character: String,
    pub quote: String,
}

/// Raw query parameters accepted by `GET /quotes`
///
/// Everything stays a string: `single` is compared against `"true"` and any
/// other value, including a malformed one, means "not single".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteSearch {
    pub character: Option<String>,
    pub anime: Option<String>,
    pub single: Option<String>,
}

impl QuoteSearch {
    /// Parses a raw query string, keeping the first value of each key
    ///
    /// Repeated keys and unknown keys never invalidate the other parameters.
    pub fn from_query(query: &str) -> Self {
        let mut search = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "character" => &mut search.character,
                "anime" => &mut search.anime,
                "single" => &mut search.single,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        search
    }

    pub fn is_single(&self) -> bool {
        self.single.as_deref() == Some("true")
    }

    pub fn filter(&self) -> QuoteFilter {
        QuoteFilter {
            character: non_empty(&self.character),
            anime: non_empty(&self.anime),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Case-insensitive substring filter over the character and anime columns
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    pub character: Option<String>,
    pub anime: Option<String>,
}

impl QuoteFilter {
    /// A filter with no constraints, matching every row
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.character.is_none() && self.anime.is_none()
    }

    /// In-process evaluation of the filter, mirroring `ILIKE '%value%'`
    pub fn matches(&self, quote: &Quote) -> bool {
        contains_ignore_case(&quote.character, self.character.as_deref())
            && contains_ignore_case(&quote.anime, self.anime.as_deref())
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}
