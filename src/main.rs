//! pricehunter - Multi-retailer price discovery CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use pricehunter::commands::SearchCommand;
use pricehunter::config::{Config, OutputFormat};
use pricehunter::countries::{currency_for, provider_region, Country};
use pricehunter::sources::Catalog;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricehunter",
    version,
    about = "Compare product prices across retailers",
    long_about = "Looks up retailer prices from a curated catalog, live shopping results, or estimates when neither is available."
)]
struct Cli {
    /// Two-letter country code (defaults to the config value, then IN)
    #[arg(short = 'C', long, global = true, env = "PRICEHUNTER_COUNTRY")]
    country: Option<String>,

    /// Shopping-search API key
    #[arg(long, global = true, env = "SERPAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Live request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "PRICEHUNTER_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find prices for a product
    #[command(alias = "s")]
    Search {
        /// Product name
        query: String,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum rating filter (0.0-5.0)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Retailer domains to hide (comma-separated)
        #[arg(long, value_delimiter = ',')]
        exclude_sites: Option<Vec<String>>,
    },

    /// List supported countries
    Countries,

    /// List products in the curated catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(country) = cli.country {
        config.country = country.trim().to_uppercase();
    }
    if let Some(key) = cli.api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key.trim().to_string());
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Search { query, min_price, max_price, min_rating, exclude_sites } => {
            // Apply search-specific config
            if min_price.is_some() {
                config.min_price = min_price;
            }
            if max_price.is_some() {
                config.max_price = max_price;
            }
            if min_rating.is_some() {
                config.min_rating = min_rating;
            }
            if let Some(sites) = exclude_sites {
                config.exclude_sites = sites;
            }

            let country = config.country.clone();
            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&query, &country).await?;
            println!("{}", output);
        }

        Commands::Countries => {
            println!("Supported countries:\n");
            println!(
                "{:<6} {:<16} {:<10} {:<8} {}",
                "Code", "Name", "Currency", "Region", "Lead retailer"
            );
            println!("{:-<6} {:-<16} {:-<10} {:-<8} {:-<16}", "", "", "", "", "");

            for country in Country::all() {
                println!(
                    "{:<6} {:<16} {:<10} {:<8} {}",
                    country.code(),
                    country.name(),
                    currency_for(country.code()),
                    provider_region(country.code()),
                    country.retailers().first().copied().unwrap_or("-")
                );
            }
        }

        Commands::Catalog => {
            let catalog = Catalog::builtin();
            println!("Curated products:\n");
            println!("{:<28} {}", "Product", "Countries");
            println!("{:-<28} {:-<20}", "", "");

            for entry in catalog.entries() {
                println!("{:<28} {}", entry.key(), entry.countries().collect::<Vec<_>>().join(", "));
            }
        }
    }

    Ok(())
}
