use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::core::cache::{CacheEntry, RateCache};
use crate::core::error::ConvertError;
use crate::core::rates::RateProvider;

/// Client for the ExchangeRate-API latest-rates endpoint
/// (`GET <base_url>/<BASE>`, no auth, no query parameters).
///
/// The cache is consulted before any network call; a fresh entry short
/// circuits the fetch entirely. Concurrent calls for the same base are
/// not coalesced, so overlapping misses each issue their own request and
/// the last one to finish overwrites the entry.
pub struct ExchangeRateApiProvider {
    base_url: String,
    cache: Arc<RateCache>,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, cache: Arc<RateCache>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    rates: std::collections::HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "RateFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn fetch_rates(&self, base: &str) -> Result<CacheEntry, ConvertError> {
        if let Some(entry) = self.cache.get(base).await {
            return Ok(entry);
        }

        let url = format!("{}/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .build()
            .map_err(ConvertError::Fetch)?;
        let response = client.get(&url).send().await.map_err(|e| {
            error!("Error fetching exchange rates: {e}");
            ConvertError::Fetch(e)
        })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Rate provider returned an error status");
            return Err(ConvertError::Network(response.status()));
        }

        let text = response.text().await.map_err(|e| {
            error!("Error reading rate provider response: {e}");
            ConvertError::Fetch(e)
        })?;
        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            error!("Malformed rate provider response for {base}: {e}");
            ConvertError::Decode(e)
        })?;

        Ok(self.cache.put(base, data.rates).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USD_RATES: &str = r#"{
        "base": "USD",
        "date": "2024-01-15",
        "rates": {
            "EUR": 0.85,
            "GBP": 0.73,
            "JPY": 110.0
        }
    }"#;

    async fn create_mock_server(base: &str, template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/{base}")))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider_for(server: &MockServer) -> ExchangeRateApiProvider {
        let cache = Arc::new(RateCache::new(Duration::from_secs(300)));
        ExchangeRateApiProvider::new(&server.uri(), cache)
    }

    #[tokio::test]
    async fn test_successful_fetch_populates_cache() {
        let server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(USD_RATES)).await;
        let provider = provider_for(&server);

        let entry = provider.fetch_rates("USD").await.unwrap();
        assert_eq!(entry.rates.get("EUR"), Some(&0.85));
        assert_eq!(entry.rates.len(), 3);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(USD_RATES))
            .expect(1)
            .mount(&server)
            .await;
        let provider = provider_for(&server);

        let first = provider.fetch_rates("USD").await.unwrap();
        let second = provider.fetch_rates("USD").await.unwrap();
        assert_eq!(first.fetched_at, second.fetched_at);
        // expect(1) is verified when the mock server drops.
    }

    #[tokio::test]
    async fn test_error_status_is_network_error() {
        let server = create_mock_server("USD", ResponseTemplate::new(500)).await;
        let provider = provider_for(&server);

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(matches!(err, ConvertError::Network(_)));
        assert_eq!(err.to_string(), "Network response was not ok");
    }

    #[tokio::test]
    async fn test_missing_rates_field_is_decode_error() {
        let body = r#"{"base": "USD", "date": "2024-01-15"}"#;
        let server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(body)).await;
        let provider = provider_for(&server);

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_fetch_error() {
        // Nothing listens on this port, so the connection is refused.
        let cache = Arc::new(RateCache::new(Duration::from_secs(300)));
        let provider = ExchangeRateApiProvider::new("http://127.0.0.1:9", cache);

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(matches!(err, ConvertError::Fetch(_)));
        assert_eq!(
            err.to_string(),
            "Failed to fetch exchange rates. Please check your internet connection."
        );
    }

    #[tokio::test]
    async fn test_distinct_bases_fetch_separately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(USD_RATES))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/EUR"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"rates": {"USD": 1.18}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        let provider = provider_for(&server);

        provider.fetch_rates("USD").await.unwrap();
        let entry = provider.fetch_rates("EUR").await.unwrap();
        assert_eq!(entry.rates.get("USD"), Some(&1.18));
    }
}
