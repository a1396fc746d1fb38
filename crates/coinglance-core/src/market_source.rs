//! Market data source contract and request/response types.
//!
//! [`MarketDataSource`] is the seam between the view state and the network:
//! the controller only ever sees a [`MarketSnapshot`] or a [`FetchError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use coinglance_core::{CoinGeckoClient, MarketDataSource};
//!
//! async fn top_ten(client: &CoinGeckoClient) {
//!     match client.fetch_top(10).await {
//!         Ok(snapshot) => println!("{} coins", snapshot.len()),
//!         Err(error) => eprintln!("Error: {error}"),
//!     }
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::config::MAX_PER_PAGE;
use crate::MarketSnapshot;

/// Message shown when upstream answers with a non-2xx status.
pub const UPSTREAM_STATUS_MESSAGE: &str = "Failed to fetch cryptocurrency data";

/// Fetch failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Non-2xx status, connection failure, or timeout.
    Transport,
    /// Body was not a JSON array.
    Parse,
    /// Rejected before any network call.
    InvalidRequest,
}

/// Human-readable fetch failure surfaced as the `Failed` view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    status: Option<u16>,
}

impl FetchError {
    pub fn upstream_status(status: u16) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: String::from(UPSTREAM_STATUS_MESSAGE),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Parse,
            message: message.into(),
            status: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidRequest,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when the failure came from a non-2xx response.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Parse => "fetch.parse",
            FetchErrorKind::InvalidRequest => "fetch.invalid_request",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

/// Fixed-parameter markets query: USD prices, market cap descending, first
/// page only, no sparkline, 24h change included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketsRequest {
    pub per_page: usize,
}

impl MarketsRequest {
    pub const VS_CURRENCY: &'static str = "usd";
    pub const ORDER: &'static str = "market_cap_desc";
    pub const PAGE: u32 = 1;
    pub const PRICE_CHANGE_WINDOW: &'static str = "24h";

    pub fn new(per_page: usize) -> Result<Self, FetchError> {
        if per_page == 0 {
            return Err(FetchError::invalid_request(
                "markets request size must be greater than zero",
            ));
        }
        if per_page > MAX_PER_PAGE {
            return Err(FetchError::invalid_request(format!(
                "markets request size must not exceed {MAX_PER_PAGE}"
            )));
        }
        Ok(Self { per_page })
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", String::from(Self::VS_CURRENCY)),
            ("order", String::from(Self::ORDER)),
            ("per_page", self.per_page.to_string()),
            ("page", Self::PAGE.to_string()),
            ("sparkline", String::from("false")),
            (
                "price_change_percentage",
                String::from(Self::PRICE_CHANGE_WINDOW),
            ),
        ]
    }

    /// Full endpoint url under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let query = self
            .query_pairs()
            .into_iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}/coins/markets?{query}", base_url.trim_end_matches('/'))
    }
}

/// Source of market snapshots.
///
/// Implementations must not retry internally; retry is the caller's decision.
pub trait MarketDataSource: Send + Sync {
    /// Short identifier used in logs and output metadata.
    fn name(&self) -> &'static str;

    /// Fetches the top `n` coins by market cap.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if `n` is zero, the transport fails, upstream
    /// answers with a non-2xx status, or the body is not a JSON array.
    fn fetch_top<'a>(
        &'a self,
        n: usize,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSnapshot, FetchError>> + Send + 'a>>;
}
