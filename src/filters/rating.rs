//! Minimum rating filter.

use super::Filter;
use crate::models::PriceRecord;

/// Filters records by minimum star rating.
pub struct RatingFilter {
    min_stars: f32,
}

impl RatingFilter {
    /// Creates a new rating filter with minimum stars.
    pub fn new(min_stars: f32) -> Self {
        Self { min_stars: min_stars.clamp(0.0, 5.0) }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, record: &PriceRecord) -> bool {
        let Some(stars) = record.stars() else {
            return true;
        };

        stars >= self.min_stars
    }

    fn description(&self) -> String {
        format!("Rating: >= {:.1} stars", self.min_stars)
    }
}
