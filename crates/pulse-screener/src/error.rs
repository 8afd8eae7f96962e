//! Screener error types

use thiserror::Error;
use uuid::Uuid;

use pulse_common::PulseError;

/// Market-data search failure
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Request failed or returned a non-success status
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL could not be parsed
    #[error("invalid market data url: {0}")]
    InvalidUrl(String),

    /// Missing or invalid configuration
    #[error(transparent)]
    Config(#[from] PulseError),
}

/// Preset storage failure
#[derive(Debug, Error)]
pub enum PresetError {
    /// No preset with that id for the user
    #[error("preset not found: {0}")]
    NotFound(Uuid),

    /// Empty or whitespace-only name
    #[error("invalid preset name: {0:?}")]
    InvalidName(String),

    /// Backing file could not be read or written
    #[error("preset storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Backing file is not valid JSON
    #[error("corrupt preset file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Preset result type
pub type PresetResult<T> = Result<T, PresetError>;
