//! MarketPulse Common - Shared types for the MarketPulse core
//!
//! This crate provides:
//! - Configuration (market data, billing fallback policy, preset storage)
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

pub use config::{
    BillingConfig, MarketDataConfig, PresetConfig, PulseConfig, UnknownEntitlementPolicy,
    DEFAULT_SCREENER_LIMIT,
};
pub use error::*;
