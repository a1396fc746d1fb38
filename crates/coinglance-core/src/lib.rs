//! # Coinglance Core
//!
//! Market snapshot client and view logic for the coinglance dashboard.
//!
//! ## Overview
//!
//! This crate provides everything the dashboard needs below the rendering
//! layer:
//!
//! - **Market data client** fetching the top coins by market cap
//! - **Formatter** for prices, signed percent changes, and tickers
//! - **Filter** matching coin names against a live query
//! - **View state controller** owning the idle/loading/loaded/failed lifecycle
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (CoinGecko) |
//! | [`config`] | Client configuration and environment overrides |
//! | [`domain`] | Domain models (Coin, MarketSnapshot) |
//! | [`error`] | Core error types |
//! | [`filter`] | Name search |
//! | [`formatter`] | Display formatting |
//! | [`http_client`] | HTTP client abstraction |
//! | [`market_source`] | Market data source trait and fetch errors |
//! | [`view_state`] | Fetch lifecycle state machine |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinglance_core::{CoinGeckoClient, MarketConfig, ViewStateController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinGeckoClient::new(MarketConfig::from_env()?);
//!     let mut controller = ViewStateController::new();
//!
//!     controller.load(&client, 10).await;
//!     for coin in controller.visible_coins("bit") {
//!         println!("{}: ${:.2}", coin.name, coin.current_price);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │ query, retry
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ViewState       │────▶│ Filter+Formatter │
//! │ Controller      │     └──────────────────┘
//! └────────┬────────┘
//!          │ fetch_top(n)
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ MarketData      │────▶│ HTTP Client      │
//! │ Source (trait)  │     │ (reqwest/fixture)│
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod http_client;
pub mod market_source;
pub mod view_state;

pub use adapters::{parse_markets_response, CoinGeckoClient};

pub use config::{MarketConfig, DEFAULT_BASE_URL, DEFAULT_PER_PAGE, MAX_PER_PAGE};

pub use domain::{Coin, MarketSnapshot, UtcDateTime};

pub use error::ValidationError;

pub use filter::filter_by_name;

pub use formatter::{
    format_change, format_percent, format_price, format_symbol, ChangeClass, ChangeDisplay,
    CoinCard, PercentDisplay, Sign,
};

pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use market_source::{
    FetchError, FetchErrorKind, MarketDataSource, MarketsRequest, UPSTREAM_STATUS_MESSAGE,
};

pub use view_state::{DashboardView, FetchState, LoadTicket, ViewStateController, SKELETON_ROWS};
