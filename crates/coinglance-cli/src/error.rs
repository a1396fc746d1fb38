use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] coinglance_core::ValidationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
            Self::Logging(_) => 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinglance_core::ValidationError;

    #[test]
    fn validation_errors_exit_with_two() {
        let error = CliError::from(ValidationError::ZeroTimeout);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "timeout must be greater than zero");
    }
}
