//! Data models shared by handlers and services.

pub mod envelope;
pub mod quote;

pub use envelope::*;
pub use quote::*;
