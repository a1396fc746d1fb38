//! Contract tests for the markets client.
//!
//! Every [`MarketDataSource`] must honour the same request shape and produce
//! snapshots the dashboard can render without further checks.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use coinglance_core::{
    CoinGeckoClient, FetchErrorKind, FixtureHttpClient, HttpClient, HttpError, HttpRequest,
    HttpResponse, MarketConfig, MarketDataSource, MarketsRequest, DEFAULT_BASE_URL,
};

struct RecordingHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("lock").push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn assert_snapshot_contract(source: &dyn MarketDataSource, coins: &[coinglance_core::Coin], n: usize) {
    assert!(!source.name().is_empty());
    assert!(coins.len() <= n, "snapshot exceeds requested size");
    for coin in coins {
        assert!(!coin.id.is_empty(), "coin id must be present");
        assert!(!coin.name.is_empty(), "coin name must be present");
        assert!(coin.current_price.is_finite() && coin.current_price >= 0.0);
        if let Some(change) = coin.price_change_percentage_24h {
            assert!(change.is_finite());
        }
    }
}

#[tokio::test]
async fn fixture_source_satisfies_snapshot_contract() {
    let source = CoinGeckoClient::mock(MarketConfig::default());

    let snapshot = source.fetch_top(10).await.expect("fixture snapshot");

    assert_eq!(snapshot.len(), 10);
    assert_eq!(snapshot.skipped, 0);
    assert_eq!(snapshot.coins[0].id, "bitcoin");
    assert_snapshot_contract(&source, &snapshot.coins, 10);
}

#[tokio::test]
async fn request_targets_the_markets_endpoint_with_fixed_parameters() {
    let http = RecordingHttpClient::new(Ok(HttpResponse::ok_json("[]")));
    let source = CoinGeckoClient::with_http_client(http.clone(), MarketConfig::default());

    source.fetch_top(10).await.expect("empty list is a valid snapshot");

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let url = &requests[0].url;
    assert!(url.starts_with(&format!("{DEFAULT_BASE_URL}/coins/markets?")));
    for pair in [
        "vs_currency=usd",
        "order=market_cap_desc",
        "per_page=10",
        "page=1",
        "sparkline=false",
        "price_change_percentage=24h",
    ] {
        assert!(url.contains(pair), "missing {pair} in {url}");
    }
    assert_eq!(
        requests[0].headers.get("accept").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(requests[0].timeout_ms, 10_000);
}

#[tokio::test]
async fn per_page_follows_requested_size_and_config_overrides() {
    let http = RecordingHttpClient::new(Ok(HttpResponse::ok_json("[]")));
    let config = MarketConfig::default()
        .with_base_url("http://127.0.0.1:8080/api/")
        .with_timeout_ms(250)
        .validate()
        .expect("valid config");
    let source = CoinGeckoClient::with_http_client(http.clone(), config);

    source.fetch_top(3).await.expect("snapshot");

    let request = &http.requests()[0];
    assert!(request.url.starts_with("http://127.0.0.1:8080/api/coins/markets?"));
    assert!(request.url.contains("per_page=3"));
    assert_eq!(request.timeout_ms, 250);
}

#[tokio::test]
async fn out_of_range_sizes_never_reach_the_network() {
    let http = RecordingHttpClient::new(Ok(HttpResponse::ok_json("[]")));
    let source = CoinGeckoClient::with_http_client(http.clone(), MarketConfig::default());

    for n in [0, 251] {
        let err = source.fetch_top(n).await.expect_err("size must be rejected");
        assert_eq!(err.kind(), FetchErrorKind::InvalidRequest);
    }
    assert!(http.requests().is_empty());
    assert!(MarketsRequest::new(250).is_ok());
}

#[tokio::test]
async fn records_are_returned_in_upstream_order() {
    let body = r#"[
        {"id":"b","name":"Beta","symbol":"b","current_price":2.0,"price_change_percentage_24h":1.0},
        {"id":"a","name":"Alpha","symbol":"a","current_price":1.0,"price_change_percentage_24h":-1.0}
    ]"#;
    let source = CoinGeckoClient::with_http_client(
        Arc::new(FixtureHttpClient::ok_json(body)),
        MarketConfig::default(),
    );

    let snapshot = source.fetch_top(2).await.expect("snapshot");

    let ids: Vec<&str> = snapshot.coins.iter().map(|coin| coin.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_snapshot_contract(&source, &snapshot.coins, 2);
}

#[tokio::test]
async fn unusable_records_are_skipped_and_counted() {
    let body = r#"[
        {"id":"bitcoin","name":"Bitcoin","symbol":"btc","current_price":65000.5,"price_change_percentage_24h":-2.345},
        {"name":"No Id","symbol":"x","current_price":1.0},
        {"id":"no-price","name":"No Price","symbol":"np","current_price":null},
        {"id":"unnamed","symbol":"un","current_price":3.0}
    ]"#;
    let source = CoinGeckoClient::with_http_client(
        Arc::new(FixtureHttpClient::ok_json(body)),
        MarketConfig::default(),
    );

    let snapshot = source.fetch_top(10).await.expect("partial data is still a snapshot");

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.skipped, 2);
    assert_eq!(snapshot.coins[1].name, "unnamed");
    assert_eq!(snapshot.coins[1].price_change_percentage_24h, None);
}
