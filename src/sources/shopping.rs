//! Live quotes from the Google Shopping engine of SerpApi.

use super::QuoteSource;
use crate::config::Config;
use crate::countries::{currency_for, provider_region};
use crate::error::FetchError;
use crate::models::{sanitize_price, PriceRecord};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Number of provider results considered per request.
const MAX_PROVIDER_RESULTS: usize = 5;

#[derive(Debug, Deserialize)]
struct ShoppingResponse {
    shopping_results: Option<Vec<ShoppingItem>>,
}

#[derive(Debug, Deserialize)]
struct ShoppingItem {
    link: Option<Value>,
    price: Option<Value>,
    title: Option<Value>,
    source: Option<Value>,
    rating: Option<Value>,
    reviews: Option<Value>,
    delivery: Option<Value>,
    thumbnail: Option<Value>,
}

impl ShoppingItem {
    fn into_record(self, country: &str) -> PriceRecord {
        let price = self
            .price
            .as_ref()
            .and_then(value_to_string)
            .map(|p| sanitize_price(&p))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "N/A".to_string());

        PriceRecord {
            link: self.link.as_ref().and_then(value_to_string).unwrap_or_default(),
            price,
            // The provider's own currency field is not consulted.
            currency: currency_for(country).to_string(),
            product_name: self.title.as_ref().and_then(value_to_string).unwrap_or_default(),
            website: self.source.as_ref().and_then(value_to_string).unwrap_or_default(),
            availability: "In stock".to_string(),
            rating: self.rating.as_ref().and_then(value_to_string),
            reviews: self.reviews.as_ref().and_then(value_to_string),
            shipping: Some(
                self.delivery.as_ref().and_then(value_to_string).unwrap_or_else(|| "Varies".to_string()),
            ),
            discount: None,
            image: self.thumbnail.as_ref().and_then(value_to_string),
        }
    }
}

/// Coerces a JSON string or number to a string.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// HTTP client for the shopping-search API.
///
/// Without an API key every fetch returns an empty list without touching
/// the network.
pub struct ShoppingClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ShoppingClient {
    /// Creates a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.api_url.clone())
    }

    /// Creates a client with a custom endpoint URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(config.live_timeout())
            .connect_timeout(config.live_timeout().min(Duration::from_secs(10)))
            .build()?;

        Ok(Self { client, api_key: config.api_key.clone().filter(|k| !k.is_empty()), base_url })
    }

    /// Returns true if an API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches up to five quotes. Never fails: provider errors are logged
    /// and reported as an empty list.
    pub async fn fetch(&self, query: &str, country: &str) -> Vec<PriceRecord> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No shopping API key configured, skipping live quotes");
            return Vec::new();
        };

        match self.try_fetch(query, country, api_key).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Shopping API error: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(
        &self,
        query: &str,
        country: &str,
        api_key: &str,
    ) -> Result<Vec<PriceRecord>, FetchError> {
        let url = format!(
            "{}?engine=google_shopping&q={}&gl={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&provider_region(country)),
        );
        debug!("GET {}&api_key=***", url);

        let request_url = format!("{}&api_key={}", url, urlencoding::encode(api_key));
        let response = self
            .client
            .get(request_url.as_str())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        let body = response.text().await?;
        let parsed: ShoppingResponse = serde_json::from_str(&body)?;
        let items = parsed.shopping_results.ok_or(FetchError::MissingResults)?;

        let records: Vec<PriceRecord> = items
            .into_iter()
            .take(MAX_PROVIDER_RESULTS)
            .map(|item| item.into_record(country))
            .collect();

        info!("Shopping API returned {} quotes for '{}'", records.len(), query);
        Ok(records)
    }
}

#[async_trait]
impl QuoteSource for ShoppingClient {
    async fn quotes(&self, query: &str, country: &str) -> Result<Vec<PriceRecord>> {
        Ok(self.fetch(query, country).await)
    }

    fn name(&self) -> &'static str {
        "shopping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config(api_key: Option<&str>) -> Config {
        Config { api_key: api_key.map(str::to_string), timeout_secs: 5, ..Config::default() }
    }

    async fn client_for(server: &MockServer, api_key: Option<&str>) -> ShoppingClient {
        let config = make_test_config(api_key);
        ShoppingClient::with_base_url(&config, format!("{}/search.json", server.uri())).unwrap()
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("4.5")), Some("4.5".to_string()));
        assert_eq!(value_to_string(&json!(4.5)), Some("4.5".to_string()));
        assert_eq!(value_to_string(&json!(1234)), Some("1234".to_string()));
        assert_eq!(value_to_string(&json!("")), None);
        assert_eq!(value_to_string(&json!(null)), None);
        assert_eq!(value_to_string(&json!({"a": 1})), None);
    }

    #[test]
    fn test_item_mapping() {
        let item: ShoppingItem = serde_json::from_value(json!({
            "link": "https://www.bestbuy.com/site/123",
            "price": "$1,099.99",
            "title": "Laptop X",
            "source": "Best Buy",
            "rating": 4.6,
            "reviews": 2048,
            "delivery": "Free delivery",
            "thumbnail": "https://img.example/x.jpg"
        }))
        .unwrap();

        let record = item.into_record("US");
        assert_eq!(record.price, "1099.99");
        assert_eq!(record.currency, "USD");
        assert_eq!(record.product_name, "Laptop X");
        assert_eq!(record.website, "Best Buy");
        assert_eq!(record.availability, "In stock");
        assert_eq!(record.rating.as_deref(), Some("4.6"));
        assert_eq!(record.reviews.as_deref(), Some("2048"));
        assert_eq!(record.shipping.as_deref(), Some("Free delivery"));
        assert_eq!(record.image.as_deref(), Some("https://img.example/x.jpg"));
        assert!(record.discount.is_none());
    }

    #[test]
    fn test_item_mapping_defaults() {
        let item: ShoppingItem = serde_json::from_value(json!({ "title": "Bare" })).unwrap();
        let record = item.into_record("IN");

        assert_eq!(record.price, "N/A");
        assert_eq!(record.currency, "INR");
        assert_eq!(record.shipping.as_deref(), Some("Varies"));
        assert!(record.link.is_empty());
        assert!(record.rating.is_none());
        assert!(record.reviews.is_none());
    }

    #[test]
    fn test_item_price_without_digits_is_na() {
        let item: ShoppingItem =
            serde_json::from_value(json!({ "price": "Call for price" })).unwrap();
        assert_eq!(item.into_record("US").price, "N/A");
    }

    #[test]
    fn test_currency_ignores_provider() {
        // Euro prices from a DE request are still labeled USD
        let item: ShoppingItem = serde_json::from_value(json!({ "price": "€499" })).unwrap();
        let record = item.into_record("DE");
        assert_eq!(record.price, "499");
        assert_eq!(record.currency, "USD");
    }

    #[tokio::test]
    async fn test_no_api_key_skips_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, None).await;
        assert!(!client.has_credentials());
        assert!(client.fetch("iphone", "US").await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_api_key_treated_as_missing() {
        let config = make_test_config(Some(""));
        let client =
            ShoppingClient::with_base_url(&config, "http://localhost".to_string()).unwrap();
        assert!(!client.has_credentials());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        let body = json!({
            "shopping_results": [
                { "link": "https://a.example/1", "price": "₹1,29,999", "title": "Galaxy S24", "source": "amazon.in", "rating": 4.5, "reviews": 812 },
                { "link": "https://b.example/2", "price": 127999, "title": "Galaxy S24", "source": "flipkart.com" }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("engine", "google_shopping"))
            .and(query_param("q", "galaxy s24"))
            .and(query_param("gl", "in"))
            .and(query_param("api_key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("secret")).await;
        let records = client.fetch("galaxy s24", "IN").await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, "129999");
        assert_eq!(records[0].currency, "INR");
        assert_eq!(records[0].rating.as_deref(), Some("4.5"));
        assert_eq!(records[0].reviews.as_deref(), Some("812"));
        assert_eq!(records[1].price, "127999");
        assert_eq!(records[1].website, "flipkart.com");
    }

    #[tokio::test]
    async fn test_fetch_tolerates_odd_field_types() {
        let mock_server = MockServer::start().await;

        let body = json!({
            "shopping_results": [
                { "link": "https://a.example/1", "price": "$12.99", "title": "USB-C Cable", "source": "walmart.com" },
                { "link": 42, "price": "$9.99", "title": 2024, "source": "ebay.com", "thumbnail": false },
                { "link": "https://c.example/3", "price": "$14.50", "title": "USB-C Cable", "source": "target.com" }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("secret")).await;
        let records = client.fetch("usb-c cable", "US").await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].product_name, "2024");
        assert_eq!(records[1].link, "42");
        assert_eq!(records[1].price, "9.99");
        assert_eq!(records[1].website, "ebay.com");
        assert!(records[1].image.is_none());
        assert_eq!(records[2].website, "target.com");
    }

    #[tokio::test]
    async fn test_fetch_takes_first_five() {
        let mock_server = MockServer::start().await;

        let items: Vec<_> = (0..8)
            .map(|i| json!({ "price": format!("${}", 10 + i), "source": format!("shop{}.com", i) }))
            .collect();

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "shopping_results": items })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("key")).await;
        let records = client.fetch("thing", "US").await;

        assert_eq!(records.len(), 5);
        assert_eq!(records[4].website, "shop4.com");
    }

    #[tokio::test]
    async fn test_fetch_missing_results_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "Invalid API key." })),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("bad")).await;
        assert!(client.fetch("thing", "US").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("key")).await;
        assert!(client.fetch("thing", "US").await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("key")).await;
        assert!(client.fetch("thing", "US").await.is_empty());

        let err = client.try_fetch("thing", "US", "key").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let config = make_test_config(Some("key"));
        let client =
            ShoppingClient::with_base_url(&config, "http://127.0.0.1:9/search.json".to_string())
                .unwrap();

        assert!(client.fetch("thing", "US").await.is_empty());
    }

    #[tokio::test]
    async fn test_quote_source_impl() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "shopping_results": [{ "price": "$5", "source": "ebay.com" }]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("key")).await;
        let records = client.quotes("cable", "US").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(client.name(), "shopping");
    }
}
