//! Estimated prices used when no curated or live data exists.

use super::ranges::PriceRangeProfile;
use crate::countries::retailers_for;
use crate::models::PriceRecord;
use tracing::debug;

/// Maximum number of retailers an estimate covers.
pub const MAX_SYNTHETIC_RESULTS: usize = 5;

/// Markup applied per retailer position, so later sites are never cheaper
/// than the shared base.
const MARKUP_PER_INDEX: f64 = 0.05;

/// Builds a retailer search URL for a query.
pub fn search_link(site: &str, query: &str) -> String {
    let q = urlencoding::encode(query);
    if site.contains("amazon") {
        format!("https://www.{}/s?k={}", site, q)
    } else if site.contains("flipkart") {
        format!("https://www.{}/search?q={}", site, q)
    } else if site.contains("bestbuy") {
        format!("https://www.{}/site/searchpage.jsp?st={}", site, q)
    } else {
        format!("https://www.{}/search?q={}", site, q)
    }
}

/// Generates plausible placeholder prices per retailer.
///
/// Values are random but the shape is fixed: one record for each of the
/// first five retailers of the country, sorted by price. Holds no state, so
/// one instance can serve concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, query: &str, country: &str) -> Vec<PriceRecord> {
        let sites = retailers_for(country);
        let profile = PriceRangeProfile::classify(query);
        let range = profile.range_for(country);

        debug!(
            "Estimating '{}' prices for {} with {} range {}..{} {}",
            query, country, profile.category, range.min, range.max, range.currency
        );

        let image = format!(
            "/placeholder.svg?height=200&width=200&text={}",
            urlencoding::encode(query)
        );

        let mut records: Vec<PriceRecord> = sites
            .iter()
            .take(MAX_SYNTHETIC_RESULTS)
            .enumerate()
            .map(|(i, site)| {
                let base: f64 = rand::random_range(range.min..range.max);
                let price = (base + i as f64 * base * MARKUP_PER_INDEX).floor() as u64;

                let rating: f64 = rand::random_range(3.5..=5.0);
                let reviews: u32 = rand::random_range(50..550);
                let discount = (i % 3 == 0).then(|| {
                    let pct: u32 = rand::random_range(5..20);
                    format!("{}% off", pct)
                });

                PriceRecord {
                    link: search_link(site, query),
                    price: price.to_string(),
                    currency: range.currency.to_string(),
                    product_name: query.to_string(),
                    website: site.to_string(),
                    availability: "In stock".to_string(),
                    rating: Some(format!("{:.1}", rating)),
                    reviews: Some(reviews.to_string()),
                    shipping: Some("Free".to_string()),
                    discount,
                    image: Some(image.clone()),
                }
            })
            .collect();

        records.sort_by(|a, b| {
            let pa = a.numeric_price().unwrap_or(f64::MAX);
            let pb = b.numeric_price().unwrap_or(f64::MAX);
            pa.total_cmp(&pb)
        });

        records
    }
}
