//! Composable filters applied to resolved price lists before display.

pub mod price;
pub mod rating;
pub mod site;

use crate::models::PriceRecord;

pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use site::SiteFilter;

/// A predicate that hides retailer offers from displayed results.
///
/// Records the predicate cannot judge (no parseable price, no rating) pass.
pub trait Filter: Send + Sync {
    /// Returns true if the offer stays visible.
    fn matches(&self, record: &PriceRecord) -> bool;

    /// Short human-readable summary, logged with `--verbose`.
    fn description(&self) -> String;
}

/// Filters applied together to a resolved price list; an offer must pass all.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a record passes all filters.
    pub fn matches(&self, record: &PriceRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Drops records that fail any filter, in place, and returns how many
    /// were hidden. Survivors keep their tier order.
    pub fn apply(&self, records: &mut Vec<PriceRecord>) -> usize {
        if self.filters.is_empty() {
            return 0;
        }
        let before = records.len();
        records.retain(|r| self.matches(r));
        before - records.len()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`FilterChain`] from the optional search flags, skipping unset ones.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a minimum rating filter.
    pub fn min_rating(mut self, min: Option<f32>) -> Self {
        if let Some(min) = min {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }

    /// Adds an excluded-retailers filter.
    pub fn exclude_sites(mut self, sites: Vec<String>) -> Self {
        if !sites.is_empty() {
            self.chain.add(SiteFilter::excluding(sites));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
