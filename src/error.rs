//! Errors raised while talking to the shopping-search provider.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] wreq::Error),

    #[error("shopping API returned status {status}")]
    Status { status: u16 },

    #[error("shopping API returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("shopping API response has no shopping_results")]
    MissingResults,
}
