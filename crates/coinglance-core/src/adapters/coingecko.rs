use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MarketConfig;
use crate::http_client::{FixtureHttpClient, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::market_source::{FetchError, MarketDataSource, MarketsRequest};
use crate::{Coin, MarketSnapshot, UtcDateTime};

/// CoinGecko `/coins/markets` client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http_client: Arc<dyn HttpClient>,
    config: MarketConfig,
}

impl CoinGeckoClient {
    /// Client backed by reqwest.
    pub fn new(config: MarketConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
        Self {
            http_client,
            config,
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: MarketConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Offline client serving the bundled top-10 sample.
    pub fn mock(config: MarketConfig) -> Self {
        Self::with_http_client(Arc::new(FixtureHttpClient::sample_markets()), config)
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    async fn fetch_markets(&self, n: usize) -> Result<MarketSnapshot, FetchError> {
        let request = MarketsRequest::new(n)?;
        let url = request.url(&self.config.base_url);
        debug!(%url, timeout_ms = self.config.timeout_ms, "requesting market snapshot");

        let started = Instant::now();
        let http_request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self
            .http_client
            .execute(http_request)
            .await
            .map_err(|error| {
                warn!(timed_out = error.timed_out(), "market request failed: {error}");
                FetchError::transport(error.message())
            })?;

        if !response.is_success() {
            warn!(status = response.status, "market request returned non-success status");
            return Err(FetchError::upstream_status(response.status));
        }

        let snapshot = parse_markets_response(&response.body)?;
        debug!(
            coins = snapshot.len(),
            skipped = snapshot.skipped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "market snapshot received"
        );
        Ok(snapshot)
    }
}

impl MarketDataSource for CoinGeckoClient {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    fn fetch_top<'a>(
        &'a self,
        n: usize,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSnapshot, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_markets(n))
    }
}

/// Parses a markets response body into a snapshot.
///
/// The body must be a JSON array. Records are normalized one by one: a record
/// without a usable `id` or `current_price` is dropped and counted in
/// [`MarketSnapshot::skipped`]; other malformed fields fall back to defaults.
pub fn parse_markets_response(body: &str) -> Result<MarketSnapshot, FetchError> {
    let records: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| FetchError::parse(format!("failed to parse market data: {e}")))?;

    let mut coins = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for (index, record) in records.iter().enumerate() {
        match normalize_record(record) {
            Ok(coin) => coins.push(coin),
            Err(reason) => {
                skipped += 1;
                warn!(index, "skipping market record: {reason}");
            }
        }
    }

    Ok(MarketSnapshot::new(coins, UtcDateTime::now()).with_skipped(skipped))
}

fn normalize_record(record: &Value) -> Result<Coin, String> {
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| String::from("missing 'id'"))?;

    let current_price = record
        .get("current_price")
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("'{id}' has no numeric 'current_price'"))?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(id);
    let symbol = record.get("symbol").and_then(Value::as_str).unwrap_or_default();
    let change = record
        .get("price_change_percentage_24h")
        .and_then(Value::as_f64);

    Coin::new(id, name, symbol, current_price, change).map_err(|error| format!("'{id}': {error}"))
}
