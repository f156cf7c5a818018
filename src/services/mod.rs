//! Business logic and service layer modules.
//!
//! Quote selection and storage, the anime scraper seam, rate limiting and
//! the self health-check loop.

pub mod health_loop;
pub mod quote_store;
pub mod quotes;
pub mod rate_limit;
pub mod scraper;

pub use health_loop::*;
pub use quote_store::*;
pub use quotes::*;
pub use rate_limit::*;
pub use scraper::*;
