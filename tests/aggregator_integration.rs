//! Integration tests for tiered price resolution.

use pricehunter::aggregator::Aggregator;
use pricehunter::commands::SearchCommand;
use pricehunter::config::{Config, OutputFormat};
use pricehunter::countries::Country;
use pricehunter::models::{SearchResponse, Tier};
use pricehunter::sources::{Catalog, ShoppingClient};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHOPPING_FIXTURE: &str = include_str!("fixtures/shopping_results.json");

fn offline_config() -> Config {
    Config { api_key: None, ..Config::default() }
}

#[tokio::test]
async fn test_unknown_product_without_key_is_estimated() {
    let aggregator = Aggregator::from_config(&offline_config()).unwrap();

    let resolution = aggregator.resolve_detailed("Random Gizmo 9000", "US").await;
    assert_eq!(resolution.tier, Tier::Synthetic);
    assert_eq!(resolution.count(), 5);

    let us_sites = &Country::Us.retailers()[..5];
    let mut previous = 0.0;
    for record in &resolution.results {
        assert!(us_sites.contains(&record.website.as_str()));
        assert_eq!(record.currency, "USD");
        assert_eq!(record.product_name, "Random Gizmo 9000");

        // default range 50..500, plus at most 20% positional markup
        let price = record.numeric_price().unwrap();
        assert!((50.0..600.0).contains(&price), "{}", price);
        assert!(price >= previous);
        previous = price;
    }
}

#[tokio::test]
async fn test_catalog_entries_resolve_without_network() {
    let aggregator = Aggregator::from_config(&offline_config()).unwrap();

    let iphone = aggregator.resolve_detailed("iPhone 16 Pro", "IN").await;
    assert_eq!(iphone.tier, Tier::Catalog);
    assert_eq!(iphone.count(), 2);
    assert!(iphone.results.iter().all(|r| r.currency == "INR"));

    // No US entry for this product: the Indian offers are returned
    let cmf = aggregator.resolve_detailed("cmf phone 1", "US").await;
    assert_eq!(cmf.tier, Tier::Catalog);
    assert_eq!(cmf.count(), 3);

    let macbook = aggregator.resolve("MacBook Pro M4", "IN").await;
    assert_eq!(macbook[0].website, "amazon.in");
    assert_eq!(macbook[0].price, "169900");
}

#[tokio::test]
async fn test_catalog_is_shared() {
    let first = Catalog::builtin();
    let second = Catalog::builtin();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 7);
}

#[tokio::test]
async fn test_live_quotes_are_deduped_sorted_and_capped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google_shopping"))
        .and(query_param("q", "Acme Trail Camera"))
        .and(query_param("gl", "us"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHOPPING_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("test-key".to_string()),
        api_url: format!("{}/search.json", server.uri()),
        ..Config::default()
    };
    let aggregator = Aggregator::from_config(&config).unwrap();

    let resolution = aggregator.resolve_detailed("Acme Trail Camera", "us").await;
    assert_eq!(resolution.tier, Tier::Live);

    // Only the first five provider items are considered. The second walmart
    // offer is dropped even though it is cheaper, and target has no price.
    let sites: Vec<_> = resolution.results.iter().map(|r| r.website.as_str()).collect();
    assert_eq!(sites, vec!["ebay.com", "walmart.com", "bestbuy.com"]);

    let prices: Vec<_> = resolution.results.iter().map(|r| r.price.as_str()).collect();
    assert_eq!(prices, vec!["99.50", "129.99", "149.99"]);

    let ebay = &resolution.results[0];
    assert_eq!(ebay.currency, "USD");
    assert_eq!(ebay.rating.as_deref(), Some("4.1"));
    assert_eq!(ebay.reviews.as_deref(), Some("1,204"));
    assert_eq!(ebay.shipping.as_deref(), Some("Varies"));
}

#[tokio::test]
async fn test_zero_timeout_still_allows_live_quotes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHOPPING_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("test-key".to_string()),
        api_url: format!("{}/search.json", server.uri()),
        timeout_secs: 0,
        ..Config::default()
    };
    let aggregator = Aggregator::from_config(&config).unwrap();

    let resolution = aggregator.resolve_detailed("Acme Trail Camera", "US").await;
    assert_eq!(resolution.tier, Tier::Live);
    assert_eq!(resolution.count(), 3);
}

#[tokio::test]
async fn test_catalog_hit_never_calls_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHOPPING_FIXTURE))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("test-key".to_string()),
        ..Config::default()
    };
    let client =
        ShoppingClient::with_base_url(&config, format!("{}/search.json", server.uri())).unwrap();
    let aggregator = Aggregator::new(Catalog::builtin(), client, Duration::from_secs(5));

    let results = aggregator.resolve("boAt Airdopes 311 Pro", "IN").await;
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_provider_failure_falls_back_to_estimates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("test-key".to_string()),
        api_url: format!("{}/search.json", server.uri()),
        ..Config::default()
    };
    let aggregator = Aggregator::from_config(&config).unwrap();

    let resolution = aggregator.resolve_detailed("gaming laptop", "IN").await;
    assert_eq!(resolution.tier, Tier::Synthetic);
    assert_eq!(resolution.count(), 5);
    assert!(resolution.results.iter().all(|r| r.currency == "INR"));
}

#[tokio::test]
async fn test_search_command_json_envelope() {
    let config = Config { format: OutputFormat::Json, ..offline_config() };
    let output = SearchCommand::new(config).execute("Nothing Phone 2a", "IN").await.unwrap();

    let response: SearchResponse = serde_json::from_str(&output).unwrap();
    assert!(!response.results.is_empty());
    assert!(response.results.iter().all(|r| r.product_name.contains("Nothing Phone")));
}

#[test]
fn test_resolve_from_blocking_context() {
    let results = tokio_test::block_on(async {
        let aggregator = Aggregator::from_config(&offline_config()).unwrap();
        aggregator.resolve("Samsung Galaxy S24 Ultra", "IN").await
    });
    assert_eq!(results.len(), 2);
}
