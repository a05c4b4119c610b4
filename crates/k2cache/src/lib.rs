//! # k2cache
//!
//! Content-addressed result cache for K2 single-expression runs.
//!
//! ## Architecture
//! - **Key**: hex SHA-256 of the expression's exact source text
//! - **Entry**: one plain file per key, decimal integer contents
//! - **Scope**: a shared directory, persisting across process runs
//!
//! Entries are created on first evaluation of a given expression text and
//! never auto-expired; only [`ExprCache::clear`] removes them.

#![warn(missing_docs)]

mod cache;
mod error;
mod stats;

pub use cache::{cache_key, ExprCache};
pub use error::{Error, Result};
pub use stats::CacheStats;
