use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const USD_RATES: &str = r#"{
        "base": "USD",
        "date": "2024-01-15",
        "rates": {
            "EUR": 0.85,
            "GBP": 0.73,
            "JPY": 110.0,
            "INR": 83.2
        }
    }"#;

    pub async fn create_mock_server(base: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/{base}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn config_for(base_url: &str) -> String {
        format!(
            r#"
provider:
  base_url: "{base_url}"
cache_ttl_secs: 300
default_from: "USD"
default_to: "EUR"
"#
        )
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_command_with_mock() {
    let mock_server = test_utils::create_mock_server("USD", test_utils::USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    fs::write(config_path, test_utils::config_for(&mock_server.uri()))
        .expect("Failed to write config file");

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "100".to_string(),
            from: "usd".to_string(),
            to: "eur".to_string(),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_rates_command_with_mock() {
    let mock_server = test_utils::create_mock_server("USD", test_utils::USD_RATES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    fs::write(config_path, test_utils::config_for(&mock_server.uri()))
        .expect("Failed to write config file");

    // Default base from the config is used when none is given.
    let result = cambio::run_command(
        cambio::AppCommand::Rates { base: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Rates failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_rates_command_propagates_provider_failure() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/USD"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    fs::write(config_path, test_utils::config_for(&mock_server.uri()))
        .expect("Failed to write config file");

    let result = cambio::run_command(
        cambio::AppCommand::Rates {
            base: Some("USD".to_string()),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_provider_serves_second_fetch_from_cache() {
    use cambio::core::cache::RateCache;
    use cambio::core::rates::RateProvider;
    use cambio::providers::ExchangeRateApiProvider;

    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/USD"))
        .respond_with(
            wiremock::ResponseTemplate::new(200).set_body_string(test_utils::USD_RATES),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(RateCache::new(Duration::from_secs(300)));
    let provider = ExchangeRateApiProvider::new(&mock_server.uri(), cache);

    let first = provider.fetch_rates("USD").await.expect("first fetch");
    info!(fetched_at = %first.fetched_at, "First fetch went to the network");
    let second = provider.fetch_rates("USD").await.expect("cached fetch");

    assert_eq!(first.fetched_at, second.fetched_at);
    assert_eq!(second.rates.get("EUR"), Some(&0.85));
    // The mounted mock's expect(1) verifies on drop that exactly one
    // request reached the server.
}

#[test_log::test(tokio::test)]
async fn test_full_conversion_pipeline_values() {
    use cambio::controller::{ConversionController, ConversionView};
    use cambio::core::cache::RateCache;
    use cambio::core::convert::{Conversion, format_amount};
    use cambio::core::rates::RateProvider;
    use cambio::providers::ExchangeRateApiProvider;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingView {
        rendered: Mutex<Vec<String>>,
    }

    impl ConversionView for CapturingView {
        fn show_loading(&self) {}
        fn show_error(&self, message: &str) {
            self.rendered.lock().unwrap().push(message.to_string());
        }
        fn hide_error(&self) {}
        fn update_display(&self, conversion: &Conversion) {
            self.rendered.lock().unwrap().push(format!(
                "{} {} = {} {}",
                format_amount(conversion.amount),
                conversion.from,
                format_amount(conversion.converted),
                conversion.to
            ));
        }
    }

    let mock_server = test_utils::create_mock_server("USD", test_utils::USD_RATES).await;
    let cache = Arc::new(RateCache::new(Duration::from_secs(300)));
    let provider: Arc<dyn RateProvider> =
        Arc::new(ExchangeRateApiProvider::new(&mock_server.uri(), cache));

    let view = Arc::new(CapturingView::default());
    let controller = ConversionController::new(
        Arc::clone(&provider),
        Arc::clone(&view) as Arc<dyn ConversionView>,
        "USD",
        "EUR",
    );

    controller.set_amount("100").await;
    controller.convert().await;

    assert_eq!(
        view.rendered.lock().unwrap().as_slice(),
        ["100.00 USD = 85.00 EUR"]
    );
}
