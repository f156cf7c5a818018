//! HTTP request handlers for API endpoints.

pub mod app;
pub mod hianime;
pub mod meta;
pub mod not_found;
pub mod quotes;

pub use app::*;
pub use hianime::*;
pub use meta::*;
pub use not_found::*;
pub use quotes::*;
