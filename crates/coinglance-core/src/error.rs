use thiserror::Error;

/// Validation and contract errors exposed by `coinglance-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("coin id cannot be empty")]
    EmptyCoinId,

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("page size must be between 1 and {max}, got {value}")]
    InvalidPageSize { value: usize, max: usize },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnvValue { name: &'static str, value: String },
}
