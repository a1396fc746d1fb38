//! Market data provider adapters.

mod coingecko;

pub use coingecko::{parse_markets_response, CoinGeckoClient};
