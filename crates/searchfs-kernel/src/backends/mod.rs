//! Search backends.
//!
//! Backends implement [`Searcher`](crate::Searcher) for different data sources.

mod catalog;
mod fixed;

pub use catalog::{CatalogConfig, CatalogSearcher, FieldValue, Record};
pub use fixed::FixedSearcher;
