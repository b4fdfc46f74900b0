//! clauselens-common — Shared error type used across all ClauseLens crates.

pub mod error;

pub use error::{ClauselensError, Result};
