//! Curated price table compiled into the binary.

use crate::models::PriceRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// Country whose offers are used when a product has none for the requested country.
const FALLBACK_COUNTRY: &str = "IN";

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| {
    Arc::new(Catalog::from_toml(BUILTIN_CATALOG).expect("built-in catalog must be valid TOML"))
});

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<ProductSection>,
}

#[derive(Debug, Deserialize)]
struct ProductSection {
    key: String,
    #[serde(default)]
    offers: Vec<OfferSection>,
}

#[derive(Debug, Deserialize)]
struct OfferSection {
    country: String,
    #[serde(flatten)]
    record: PriceRecord,
}

/// Known offers for one product, grouped by country in declaration order.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    key: String,
    countries: Vec<(String, Vec<PriceRecord>)>,
}

impl CatalogEntry {
    /// Lowercase product-name fragment this entry is matched by.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Country codes with at least one offer.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|(code, _)| code.as_str())
    }

    /// Offers for a country, if any were declared.
    pub fn offers(&self, country: &str) -> Option<&[PriceRecord]> {
        self.countries.iter().find(|(code, _)| code == country).map(|(_, records)| records.as_slice())
    }
}

/// Immutable lookup table from product-name fragments to curated offers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Returns the catalog shipped with the crate.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Parses a catalog from TOML `[[products]]` tables.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).context("Failed to parse catalog")?;

        let entries = file
            .products
            .into_iter()
            .map(|product| {
                let mut countries: Vec<(String, Vec<PriceRecord>)> = Vec::new();
                for offer in product.offers {
                    let code = offer.country.to_uppercase();
                    match countries.iter_mut().find(|(c, _)| *c == code) {
                        Some((_, records)) => records.push(offer.record),
                        None => countries.push((code, vec![offer.record])),
                    }
                }
                CatalogEntry { key: product.key.to_lowercase(), countries }
            })
            .collect();

        Ok(Self { entries })
    }

    /// Finds curated offers for a query.
    ///
    /// A key matches when either the lowercased query contains it or it
    /// contains the query. Keys are tried in declaration order and the first
    /// one with offers for `country` (or for India as a fallback) wins.
    /// Short queries such as "pro" can therefore match unrelated products.
    pub fn lookup(&self, query: &str, country: &str) -> &[PriceRecord] {
        let query = query.to_lowercase();

        for entry in &self.entries {
            if !(query.contains(entry.key.as_str()) || entry.key.contains(query.as_str())) {
                continue;
            }

            let offers = entry.offers(country).or_else(|| entry.offers(FALLBACK_COUNTRY));
            match offers {
                Some(records) if !records.is_empty() => {
                    debug!("Catalog hit '{}' for {} ({} offers)", entry.key, country, records.len());
                    return records;
                }
                _ => debug!("Catalog key '{}' matched but has no offers for {}", entry.key, country),
            }
        }

        &[]
    }

    /// Returns all entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Returns all keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
