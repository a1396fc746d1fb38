use serde::{Deserialize, Serialize};

use crate::filter::filter_by_name;
use crate::{UtcDateTime, ValidationError};

/// One asset row of a market snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// USD price.
    pub current_price: f64,
    /// `None` when upstream omitted the field or sent a non-number.
    pub price_change_percentage_24h: Option<f64>,
}

impl Coin {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: f64,
        price_change_percentage_24h: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyCoinId);
        }
        validate_non_negative("current_price", current_price)?;
        validate_optional_finite("price_change_percentage_24h", price_change_percentage_24h)?;

        Ok(Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            current_price,
            price_change_percentage_24h,
        })
    }
}

/// Ordered batch of coins produced by a single fetch.
///
/// Order is the upstream order (market cap, descending) and survives filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub coins: Vec<Coin>,
    pub fetched_at: UtcDateTime,
    /// Upstream records dropped during normalization.
    pub skipped: usize,
}

impl MarketSnapshot {
    pub fn new(coins: Vec<Coin>, fetched_at: UtcDateTime) -> Self {
        Self {
            coins,
            fetched_at,
            skipped: 0,
        }
    }

    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Snapshot restricted to coins whose name contains `query`.
    pub fn filtered(&self, query: &str) -> Self {
        Self {
            coins: filter_by_name(&self.coins, query),
            fetched_at: self.fetched_at,
            skipped: self.skipped,
        }
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
    }
    Ok(())
}
