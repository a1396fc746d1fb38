//! # Domain Models
//!
//! Value types shared by the client, the filter, and the view state.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Coin`] | One asset with price and 24h change |
//! | [`MarketSnapshot`] | Ordered coins from one fetch |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Construction validates invariants: a coin id is never blank and a price is
//! always a finite, non-negative number.

mod coin;
mod timestamp;

pub use coin::{Coin, MarketSnapshot};
pub use timestamp::UtcDateTime;
