//! Error types for MarketPulse

use thiserror::Error;

/// MarketPulse error type
#[derive(Error, Debug)]
pub enum PulseError {
    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    ConfigError(String),

    /// Required setting missing (API key, base URL)
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Result type for MarketPulse
pub type PulseResult<T> = Result<T, PulseError>;
