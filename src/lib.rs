//! pricehunter - Multi-retailer price discovery
//!
//! Resolves a product name and country to a ranked list of retailer offers
//! from a curated catalog, a live shopping-search API, or generated estimates.

pub mod aggregator;
pub mod commands;
pub mod config;
pub mod countries;
pub mod error;
pub mod filters;
pub mod format;
pub mod models;
pub mod sources;

pub use aggregator::Aggregator;
pub use config::Config;
pub use countries::Country;
pub use models::{PriceRecord, Resolution, SearchResponse, Tier};
pub use sources::{Catalog, QuoteSource, ShoppingClient, SyntheticGenerator};
