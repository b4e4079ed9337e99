//! Price ranges used to estimate prices per product category.

use crate::countries::currency_for;

/// Price bounds and currency for one category in one country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub currency: &'static str,
}

/// A category keyword with its Indian and generic price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRangeProfile {
    pub category: &'static str,
    inr: (f64, f64),
    usd: (f64, f64),
}

/// Categories in matching order; the first keyword contained in the query wins.
const PROFILES: &[PriceRangeProfile] = &[
    PriceRangeProfile { category: "macbook", inr: (120_000.0, 250_000.0), usd: (1_200.0, 2_500.0) },
    PriceRangeProfile { category: "iphone", inr: (50_000.0, 150_000.0), usd: (500.0, 1_500.0) },
    PriceRangeProfile { category: "laptop", inr: (30_000.0, 200_000.0), usd: (300.0, 2_000.0) },
    PriceRangeProfile { category: "headphones", inr: (1_000.0, 30_000.0), usd: (10.0, 300.0) },
    PriceRangeProfile { category: "phone", inr: (8_000.0, 100_000.0), usd: (80.0, 1_000.0) },
];

const DEFAULT_PROFILE: PriceRangeProfile =
    PriceRangeProfile { category: "default", inr: (5_000.0, 50_000.0), usd: (50.0, 500.0) };

impl PriceRangeProfile {
    /// Classifies a query by the first category keyword it contains.
    pub fn classify(query: &str) -> &'static PriceRangeProfile {
        let query = query.to_lowercase();
        PROFILES.iter().find(|p| query.contains(p.category)).unwrap_or(&DEFAULT_PROFILE)
    }

    /// Returns the bounds for a country. India uses rupee magnitudes; every
    /// other country gets the USD range.
    pub fn range_for(&self, country: &str) -> PriceRange {
        let (min, max) = if country == "IN" { self.inr } else { self.usd };
        PriceRange { min, max, currency: currency_for(country) }
    }

    /// Returns all keyword categories followed by the default.
    pub fn all() -> impl Iterator<Item = &'static PriceRangeProfile> {
        PROFILES.iter().chain(std::iter::once(&DEFAULT_PROFILE))
    }
}
