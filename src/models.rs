//! Data models for price records and aggregated search results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One retailer's offer for a product.
///
/// Prices are kept as the strings the source supplied so curated and live
/// records render exactly as received; use [`PriceRecord::numeric_price`]
/// for comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Offer or search-results URL
    pub link: String,
    /// Decimal price string, e.g. "15999"
    pub price: String,
    /// Currency code (INR, USD, ...)
    pub currency: String,
    /// Display name of the product
    pub product_name: String,
    /// Retailer domain; the dedup key within one result set
    pub website: String,
    /// Stock status
    pub availability: String,
    /// Star rating, "0.0" to "5.0"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Review count, may contain thousands separators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    /// Image URL or path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PriceRecord {
    /// Returns the price as a number, or `None` when it cannot be parsed.
    pub fn numeric_price(&self) -> Option<f64> {
        parse_price(&self.price)
    }

    /// Returns the star rating as a number if present and well-formed.
    pub fn stars(&self) -> Option<f32> {
        self.rating.as_deref().and_then(|r| r.trim().parse::<f32>().ok()).filter(|r| r.is_finite())
    }

    /// Returns the review count with thousands separators removed.
    pub fn review_count(&self) -> Option<u32> {
        self.reviews.as_deref().and_then(|r| {
            let digits: String = r.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
    }
}

/// Strips every character that is not an ASCII digit or a decimal point.
pub fn sanitize_price(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Parses a price string after sanitizing it.
///
/// Returns `None` for "N/A", empty remainders, malformed numbers and
/// non-finite or negative values.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = sanitize_price(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
}

/// The data source that produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Catalog,
    Live,
    Synthetic,
}

impl Tier {
    /// Human-readable label for the data source.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Catalog => "Curated product database",
            Tier::Live => "Live shopping results",
            Tier::Synthetic => "Estimated prices",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Catalog => "catalog",
            Tier::Live => "live",
            Tier::Synthetic => "synthetic",
        };
        write!(f, "{}", name)
    }
}

/// An ordered result set together with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tier: Tier,
    pub results: Vec<PriceRecord>,
}

impl Resolution {
    pub fn new(tier: Tier, results: Vec<PriceRecord>) -> Self {
        Self { tier, results }
    }

    /// Returns number of records.
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Returns the cheapest parseable record, if any.
    pub fn lowest(&self) -> Option<&PriceRecord> {
        self.results
            .iter()
            .filter_map(|r| r.numeric_price().map(|p| (p, r)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, r)| r)
    }
}

/// Response envelope handed to presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<PriceRecord>,
}

impl From<Resolution> for SearchResponse {
    fn from(resolution: Resolution) -> Self {
        Self { results: resolution.results }
    }
}
