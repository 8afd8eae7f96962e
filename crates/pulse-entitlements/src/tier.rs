//! Subscription tier model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription tier, ordered by privilege level
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// No active subscription
    #[default]
    None = 0,
    /// Entry paid tier
    Gold = 1,
    /// Mid paid tier
    Platinum = 2,
    /// Top paid tier
    Diamond = 3,
}

/// Canonical billing entitlement ids, highest priority first
pub const CANONICAL_ENTITLEMENTS: [(&str, Tier); 3] = [
    ("diamond_access", Tier::Diamond),
    ("platinum_access", Tier::Platinum),
    ("gold_access", Tier::Gold),
];

/// Substring tokens for the legacy scan, highest priority first
pub(crate) const LEGACY_TOKENS: [(&str, Tier); 3] = [
    ("diamond", Tier::Diamond),
    ("platinum", Tier::Platinum),
    ("gold", Tier::Gold),
];

impl Tier {
    /// All tiers, lowest first
    pub const ALL: [Tier; 4] = [Tier::None, Tier::Gold, Tier::Platinum, Tier::Diamond];

    /// Numeric privilege level
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Whether this is a paid tier
    #[inline]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Tier::None)
    }

    /// Exact lookup in the canonical entitlement table
    pub fn from_canonical(identifier: &str) -> Option<Tier> {
        CANONICAL_ENTITLEMENTS
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(identifier))
            .map(|(_, tier)| *tier)
    }

    /// Legacy compatibility: best-effort substring match on an entitlement
    /// or product identifier (`"pulse_platinum_monthly"` -> Platinum).
    ///
    /// Only used when no canonical id is present.
    pub fn from_identifier_legacy(identifier: &str) -> Option<Tier> {
        let lowered = identifier.to_ascii_lowercase();
        LEGACY_TOKENS
            .iter()
            .find(|(token, _)| lowered.contains(token))
            .map(|(_, tier)| *tier)
    }

    /// Canonical id first, then the legacy scan
    pub fn from_identifier(identifier: &str) -> Option<Tier> {
        Self::from_canonical(identifier).or_else(|| Self::from_identifier_legacy(identifier))
    }

    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::Diamond => "diamond",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tier name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier: {0}")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "free" => Ok(Tier::None),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            "diamond" => Ok(Tier::Diamond),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}
