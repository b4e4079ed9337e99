//! Retailer exclusion filter.

use super::Filter;
use crate::models::PriceRecord;

/// Hides records whose website contains any excluded fragment.
pub struct SiteFilter {
    excluded: Vec<String>,
}

impl SiteFilter {
    /// Creates a filter excluding the given domain fragments (case-insensitive).
    pub fn excluding(sites: Vec<String>) -> Self {
        Self {
            excluded: sites
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Filter for SiteFilter {
    fn matches(&self, record: &PriceRecord) -> bool {
        let website = record.website.to_lowercase();
        !self.excluded.iter().any(|s| website.contains(s.as_str()))
    }

    fn description(&self) -> String {
        format!("Exclude sites: {}", self.excluded.join(", "))
    }
}
