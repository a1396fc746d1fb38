//! Display formatting for prices, percent changes, and tickers.
//!
//! Every function here is pure. Numbers are rendered with en-US conventions:
//! `,` groups integer digits by three and `.` separates two fraction digits.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Coin;

/// Direction of a percent change. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered percent change with its sign classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentDisplay {
    pub text: String,
    pub sign: Sign,
}

/// Style class attached to a rendered 24h change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeClass {
    Positive,
    Negative,
    /// Upstream did not report a change.
    Unknown,
}

impl ChangeClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Unknown => "unknown",
        }
    }
}

impl From<Sign> for ChangeClass {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Positive => Self::Positive,
            Sign::Negative => Self::Negative,
        }
    }
}

/// Rendered 24h change, including the case where the value is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDisplay {
    pub text: String,
    pub class: ChangeClass,
}

impl ChangeDisplay {
    pub const UNKNOWN_TEXT: &'static str = "n/a";

    pub fn unknown() -> Self {
        Self {
            text: String::from(Self::UNKNOWN_TEXT),
            class: ChangeClass::Unknown,
        }
    }
}

impl From<PercentDisplay> for ChangeDisplay {
    fn from(percent: PercentDisplay) -> Self {
        Self {
            text: percent.text,
            class: percent.sign.into(),
        }
    }
}

/// Display-ready projection of a [`Coin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinCard {
    /// Stable key for the row.
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub change: ChangeDisplay,
}

impl From<&Coin> for CoinCard {
    fn from(coin: &Coin) -> Self {
        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: format_symbol(&coin.symbol),
            price: format!("${}", format_price(coin.current_price)),
            change: format_change(coin.price_change_percentage_24h),
        }
    }
}

/// Formats a price with thousands grouping and exactly two decimals.
///
/// No currency symbol is added.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = fixed_two(value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}{}.{fraction}", group_thousands(whole))
}

/// Formats a percent change, prefixing `+` when the value is non-negative.
pub fn format_percent(value: f64) -> PercentDisplay {
    // -0.0 would otherwise print as "+-0.00%".
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = Sign::of(value);
    let prefix = match sign {
        Sign::Positive => "+",
        Sign::Negative => "",
    };

    let digits = if value.is_finite() {
        let magnitude = fixed_two(value.abs());
        if value < 0.0 {
            format!("-{magnitude}")
        } else {
            magnitude
        }
    } else {
        value.to_string()
    };

    PercentDisplay {
        text: format!("{prefix}{digits}%"),
        sign,
    }
}

/// Formats an optional change; a missing value renders as an unknown marker
/// rather than a fabricated `+0.00%`.
pub fn format_change(value: Option<f64>) -> ChangeDisplay {
    match value {
        Some(value) if value.is_finite() => format_percent(value).into(),
        _ => ChangeDisplay::unknown(),
    }
}

pub fn format_symbol(value: &str) -> String {
    value.to_uppercase()
}

/// Two-decimal rendering of a finite, non-negative value.
///
/// `{:.2}` resolves exact halves to the even digit; an exact half here
/// rounds up instead, so `0.125` becomes `0.13`.
fn fixed_two(value: f64) -> String {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

    let halves = value * 200.0;
    let exact_half = halves < EXACT_LIMIT
        && halves.fract() == 0.0
        && halves % 2.0 == 1.0
        && halves / 200.0 == value;
    if exact_half {
        let cents = (halves as u64 + 1) / 2;
        return format!("{}.{:02}", cents / 100, cents % 100);
    }
    format!("{value:.2}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
