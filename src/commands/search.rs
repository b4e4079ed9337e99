//! Search command implementation.

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use anyhow::{bail, Context, Result};
use tracing::{debug, info};

/// Resolves prices for a product and renders them.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, query: &str, country: &str) -> Result<String> {
        let aggregator =
            Aggregator::from_config(&self.config).context("Failed to set up price sources")?;

        self.execute_with_aggregator(&aggregator, query, country).await
    }

    /// Executes the search with a provided aggregator (for testing).
    pub async fn execute_with_aggregator(
        &self,
        aggregator: &Aggregator,
        query: &str,
        country: &str,
    ) -> Result<String> {
        let query = query.trim();
        let country = country.trim();

        if query.is_empty() {
            bail!("Product name is required");
        }
        if country.is_empty() {
            bail!("Country is required");
        }

        info!("Searching prices for '{}' in {}", query, country);

        let mut resolution = aggregator.resolve_detailed(query, country).await;

        let filters = FilterChainBuilder::new()
            .price_range(self.config.min_price, self.config.max_price)
            .min_rating(self.config.min_rating)
            .exclude_sites(self.config.exclude_sites.clone())
            .build();

        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let hidden = filters.apply(&mut resolution.results);

        info!(
            "{} prices from {} ({} hidden by filters)",
            resolution.count() + hidden,
            resolution.tier,
            hidden
        );

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_resolution(&resolution))
    }
}
