//! Price sources: curated catalog, live shopping search and synthetic estimates.

pub mod catalog;
pub mod ranges;
pub mod shopping;
pub mod synthetic;

use crate::models::PriceRecord;
use anyhow::Result;
use async_trait::async_trait;

pub use catalog::{Catalog, CatalogEntry};
pub use ranges::{PriceRange, PriceRangeProfile};
pub use shopping::ShoppingClient;
pub use synthetic::SyntheticGenerator;

/// A source of live quotes - enables mocking the network tier in tests.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches quotes for a query in a country. An empty vector means "no data".
    async fn quotes(&self, query: &str, country: &str) -> Result<Vec<PriceRecord>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
