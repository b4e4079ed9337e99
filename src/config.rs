//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Default shopping-search endpoint.
pub const DEFAULT_API_URL: &str = "https://serpapi.com/search.json";

/// Shortest live request timeout; lower values are raised to this.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Two-letter country code used when none is given
    #[serde(default = "default_country")]
    pub country: String,

    /// Shopping-search API key; live quotes are skipped without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Shopping-search endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upper bound for the live quote request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Filter: minimum price
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Filter: maximum price
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Filter: minimum rating
    #[serde(default)]
    pub min_rating: Option<f32>,

    /// Filter: retailer domain fragments to hide
    #[serde(default)]
    pub exclude_sites: Vec<String>,
}

fn default_country() -> String {
    "IN".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country: default_country(),
            api_key: None,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            min_price: None,
            max_price: None,
            min_rating: None,
            exclude_sites: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("pricehunter.toml");
        if local_config.exists() {
            debug!("Found pricehunter.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pricehunter").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("SERPAPI_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key.trim().to_string());
            }
        }

        if let Ok(country) = std::env::var("PRICEHUNTER_COUNTRY") {
            if !country.trim().is_empty() {
                self.country = country.trim().to_uppercase();
            }
        }

        if let Ok(timeout) = std::env::var("PRICEHUNTER_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(t) if t >= MIN_TIMEOUT_SECS => self.timeout_secs = t,
                _ => warn!("Ignoring invalid PRICEHUNTER_TIMEOUT: {}", timeout),
            }
        }

        if let Ok(url) = std::env::var("PRICEHUNTER_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }

        self
    }

    /// Returns the live request timeout, never shorter than [`MIN_TIMEOUT_SECS`].
    pub fn live_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
