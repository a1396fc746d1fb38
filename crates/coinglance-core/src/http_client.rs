//! Transport seam between the market client and the network.
//!
//! [`CoinGeckoClient`](crate::CoinGeckoClient) only ever talks to an
//! [`HttpClient`]; production wires in [`ReqwestHttpClient`], while `--mock`
//! runs and tests use [`FixtureHttpClient`].

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Top-10 market sample served by [`FixtureHttpClient::sample_markets`].
const SAMPLE_MARKETS_JSON: &str = include_str!("../fixtures/markets_top10.json");

/// Outbound `GET` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Lowercased header names.
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        self.headers.insert(name, value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("{0}")]
    TimedOut(String),
    #[error("{0}")]
    Failed(String),
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimedOut(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::TimedOut(message) | Self::Failed(message) => message,
        }
    }

    pub const fn timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }
}

pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Answers every request with the same canned result.
#[derive(Debug, Clone)]
pub struct FixtureHttpClient {
    response: Result<HttpResponse, HttpError>,
}

impl FixtureHttpClient {
    pub fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self { response }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(Ok(HttpResponse::ok_json(body)))
    }

    pub fn sample_markets() -> Self {
        Self::ok_json(SAMPLE_MARKETS_JSON)
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        debug!(url = %request.url, "serving fixture response");
        Box::pin(std::future::ready(self.response.clone()))
    }
}

/// Network transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Builds a client that identifies itself with `user_agent`.
    ///
    /// Falls back to reqwest's default client if the builder rejects the
    /// configuration, so construction never fails.
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|error| {
                debug!("falling back to default reqwest client: {error}");
                reqwest::Client::new()
            });
        Self { client }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = request
            .headers
            .iter()
            .fold(self.client.get(&request.url), |builder, (name, value)| {
                builder.header(name, value)
            });

        let response = headers
            .timeout(Duration::from_millis(request.timeout_ms))
            .send()
            .await
            .map_err(|error| classify(&error, request.timeout_ms))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| classify(&error, request.timeout_ms))?;

        Ok(HttpResponse::with_status(status, body))
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}

fn classify(error: &reqwest::Error, timeout_ms: u64) -> HttpError {
    if error.is_timeout() {
        HttpError::timeout(format!("request timed out after {timeout_ms}ms"))
    } else if error.is_connect() {
        HttpError::new(format!("connection failed: {error}"))
    } else if error.is_body() || error.is_decode() {
        HttpError::new(format!("failed to read response body: {error}"))
    } else {
        HttpError::new(format!("request failed: {error}"))
    }
}
