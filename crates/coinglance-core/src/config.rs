//! Client configuration with environment overrides.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `COINGLANCE_BASE_URL` | `base_url` | `https://api.coingecko.com/api/v3` |
//! | `COINGLANCE_PER_PAGE` | `per_page` | `10` |
//! | `COINGLANCE_TIMEOUT_MS` | `timeout_ms` | `10000` |

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_PER_PAGE: usize = 10;
/// Largest page the markets endpoint serves.
pub const MAX_PER_PAGE: usize = 250;

const ENV_BASE_URL: &str = "COINGLANCE_BASE_URL";
const ENV_PER_PAGE: &str = "COINGLANCE_PER_PAGE";
const ENV_TIMEOUT_MS: &str = "COINGLANCE_TIMEOUT_MS";

/// Settings for the market snapshot client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub base_url: String,
    pub per_page: usize,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            per_page: DEFAULT_PER_PAGE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: String::from(concat!("coinglance/", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl MarketConfig {
    /// Defaults overridden by `COINGLANCE_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_PER_PAGE) {
            config.per_page = raw.trim().parse().map_err(|_| ValidationError::InvalidEnvValue {
                name: ENV_PER_PAGE,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms =
                raw.trim().parse().map_err(|_| ValidationError::InvalidEnvValue {
                    name: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
        }

        config.validate()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Checks ranges and normalizes the base url (no trailing slash).
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ValidationError::InvalidPageSize {
                value: self.per_page,
                max: MAX_PER_PAGE,
            });
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }

        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl {
                value: self.base_url,
            });
        }
        self.base_url = trimmed.to_owned();

        Ok(self)
    }
}
