//! Tiered price resolution: curated catalog, then live quotes, then estimates.

use crate::config::Config;
use crate::models::{PriceRecord, Resolution, Tier};
use crate::sources::{Catalog, QuoteSource, ShoppingClient, SyntheticGenerator};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Maximum number of live quotes returned after ranking.
pub const MAX_LIVE_RESULTS: usize = 8;

/// Ranks raw live quotes.
///
/// Keeps the first record seen for each website (not the cheapest), drops
/// records whose price does not parse, sorts ascending by price and keeps
/// at most [`MAX_LIVE_RESULTS`].
pub fn rank_live(records: Vec<PriceRecord>) -> Vec<PriceRecord> {
    let mut seen = HashSet::new();

    let mut priced: Vec<(f64, PriceRecord)> = records
        .into_iter()
        .filter(|r| seen.insert(r.website.clone()))
        .filter_map(|r| r.numeric_price().map(|price| (price, r)))
        .collect();

    priced.sort_by(|a, b| a.0.total_cmp(&b.0));
    priced.truncate(MAX_LIVE_RESULTS);
    priced.into_iter().map(|(_, r)| r).collect()
}

/// Resolves `(query, country)` to an ordered, never-empty list of offers.
///
/// The catalog answers first and is returned untouched. On a miss the live
/// source is queried under a timeout and its output ranked. If that yields
/// nothing, or anything goes wrong, synthetic estimates are returned.
pub struct Aggregator {
    catalog: Arc<Catalog>,
    live: Box<dyn QuoteSource>,
    synthetic: SyntheticGenerator,
    live_timeout: Duration,
}

impl Aggregator {
    /// Creates an aggregator over the given catalog and live source.
    pub fn new(catalog: Arc<Catalog>, live: impl QuoteSource + 'static, live_timeout: Duration) -> Self {
        Self { catalog, live: Box::new(live), synthetic: SyntheticGenerator::new(), live_timeout }
    }

    /// Creates an aggregator with the built-in catalog and the shopping API client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let live = ShoppingClient::new(config).context("Failed to create shopping API client")?;
        Ok(Self::new(Catalog::builtin(), live, config.live_timeout()))
    }

    /// Returns the catalog consulted by the first tier.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolves prices for a query. Never fails and never returns an empty list.
    pub async fn resolve(&self, query: &str, country: &str) -> Vec<PriceRecord> {
        self.resolve_detailed(query, country).await.results
    }

    /// Like [`Aggregator::resolve`], also reporting which tier answered.
    pub async fn resolve_detailed(&self, query: &str, country: &str) -> Resolution {
        let country = country.trim().to_uppercase();

        match self.try_resolve(query, &country).await {
            Ok(resolution) => resolution,
            Err(e) => {
                error!("Price lookup for '{}' failed, using estimates: {:#}", query, e);
                Resolution::new(Tier::Synthetic, self.synthetic.generate(query, &country))
            }
        }
    }

    async fn try_resolve(&self, query: &str, country: &str) -> Result<Resolution> {
        let curated = self.catalog.lookup(query, country);
        if !curated.is_empty() {
            info!("Found {} curated prices for '{}'", curated.len(), query);
            return Ok(Resolution::new(Tier::Catalog, curated.to_vec()));
        }

        let source = self.live.name();
        debug!("Catalog miss for '{}', querying {}", query, source);

        let quotes = tokio::time::timeout(self.live_timeout, self.live.quotes(query, country))
            .await
            .with_context(|| format!("{} source timed out after {:?}", source, self.live_timeout))?
            .with_context(|| format!("{} source failed", source))?;

        let fetched = quotes.len();
        let ranked = rank_live(quotes);
        if !ranked.is_empty() {
            info!("Using {} of {} live quotes for '{}'", ranked.len(), fetched, query);
            return Ok(Resolution::new(Tier::Live, ranked));
        }

        debug!("No usable live quotes for '{}', estimating prices", query);
        Ok(Resolution::new(Tier::Synthetic, self.synthetic.generate(query, country)))
    }
}
