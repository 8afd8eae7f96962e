//! MarketPulse configuration
//!
//! Loaded from a JSON file. Only API keys are read from the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PulseError, PulseResult};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "PULSE_CONFIG";
/// Environment variable holding the market-data API key
pub const MARKET_DATA_API_KEY_ENV: &str = "PULSE_MARKET_DATA_API_KEY";

/// Default result-count limit sent with every screener query
pub const DEFAULT_SCREENER_LIMIT: u32 = 100;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Market-data provider
    pub market_data: MarketDataConfig,
    /// Billing / entitlement handling
    pub billing: BillingConfig,
    /// Screener preset storage
    pub presets: PresetConfig,
}

impl PulseConfig {
    /// Load from file
    pub fn load(path: impl AsRef<Path>) -> PulseResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from `$PULSE_CONFIG`, falling back to defaults when the file is absent
    pub fn from_env() -> PulseResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if Path::new(&path).exists() => Self::load(path),
            Ok(path) => {
                tracing::warn!(%path, "config not found, using defaults");
                Ok(Self::with_env_defaults())
            }
            Err(_) => Ok(Self::with_env_defaults()),
        }
    }

    /// Save to file
    pub fn save(&self, path: impl AsRef<Path>) -> PulseResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn with_env_defaults() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(MARKET_DATA_API_KEY_ENV) {
            if !key.is_empty() {
                self.market_data.api_key = Some(key);
            }
        }
    }
}

/// Market-data endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// API key (usually from the environment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Result-count limit for screener queries
    pub screener_limit: u32,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl MarketDataConfig {
    /// API key or an error naming the missing setting
    pub fn require_api_key(&self) -> PulseResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(PulseError::MissingSetting(MARKET_DATA_API_KEY_ENV))
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://financialmodelingprep.com/stable".into(),
            api_key: None,
            screener_limit: DEFAULT_SCREENER_LIMIT,
            timeout_secs: 30,
        }
    }
}

/// What to do with active entitlements whose names match no known tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownEntitlementPolicy {
    /// Any active entitlement counts as Gold
    #[default]
    TreatAsGold,
    /// Unrecognized entitlements grant nothing
    Ignore,
}

/// Billing settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Fallback for unrecognized entitlement names
    pub unknown_entitlement_policy: UnknownEntitlementPolicy,
}

/// Preset storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    /// JSON file holding saved presets
    pub path: PathBuf,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("screener-presets.json"),
        }
    }
}
