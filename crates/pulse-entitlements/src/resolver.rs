//! Entitlement Resolver
//!
//! Maps a snapshot of active billing entitlements to the single current tier.
//!
//! ```text
//!  active entitlements
//!         │
//!         ▼
//!  ┌──────────────┐ hit  ┌────────────────────┐
//!  │ canonical ids│────► │ Diamond > Platinum │
//!  └──────┬───────┘      │ > Gold             │
//!         │ miss         └────────────────────┘
//!         ▼
//!  ┌──────────────┐ hit
//!  │ legacy scan  │────► token match on key / product id
//!  └──────┬───────┘
//!         │ miss
//!         ▼
//!  non-empty ? UnknownEntitlementPolicy : None
//! ```

use serde::{Deserialize, Serialize};

use pulse_common::UnknownEntitlementPolicy;

use crate::model::{ActiveEntitlements, Entitlement};
use crate::tier::{Tier, CANONICAL_ENTITLEMENTS, LEGACY_TOKENS};

/// Which rule decided the tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Canonical entitlement id present
    Canonical { key: String },
    /// Legacy substring match on an entitlement key or product id
    Legacy { key: String },
    /// Active entitlements matched nothing; fallback policy applied
    Indeterminate { key: String },
    /// No active entitlements
    Empty,
}

/// Resolved tier plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Current tier
    pub tier: Tier,
    /// Deciding rule
    pub source: ResolutionSource,
}

impl Resolution {
    /// Resolution of an empty snapshot
    pub fn none() -> Self {
        Self {
            tier: Tier::None,
            source: ResolutionSource::Empty,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::none()
    }
}

/// Entitlement resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitlementResolver {
    policy: UnknownEntitlementPolicy,
}

impl EntitlementResolver {
    /// Create resolver with a fallback policy
    pub fn new(policy: UnknownEntitlementPolicy) -> Self {
        Self { policy }
    }

    /// Fallback policy in use
    pub fn policy(&self) -> UnknownEntitlementPolicy {
        self.policy
    }

    /// Resolve the current tier. Total over its input; never fails.
    pub fn resolve(&self, active: &ActiveEntitlements) -> Resolution {
        if active.is_empty() {
            return Resolution::none();
        }

        if let Some(resolution) = Self::canonical(active) {
            return resolution;
        }

        if let Some(resolution) = Self::legacy(active) {
            tracing::debug!(
                tier = %resolution.tier,
                source = ?resolution.source,
                "tier resolved by legacy identifier scan"
            );
            return resolution;
        }

        // Non-empty, first key is the deterministic pick
        let key = active.keys().next().cloned().unwrap_or_default();
        let tier = match self.policy {
            UnknownEntitlementPolicy::TreatAsGold => Tier::Gold,
            UnknownEntitlementPolicy::Ignore => Tier::None,
        };
        tracing::warn!(
            %key,
            %tier,
            count = active.len(),
            "active entitlements match no known tier"
        );
        Resolution {
            tier,
            source: ResolutionSource::Indeterminate { key },
        }
    }

    fn canonical(active: &ActiveEntitlements) -> Option<Resolution> {
        CANONICAL_ENTITLEMENTS.iter().find_map(|(id, tier)| {
            active
                .keys()
                .find(|key| key.eq_ignore_ascii_case(id))
                .map(|key| Resolution {
                    tier: *tier,
                    source: ResolutionSource::Canonical { key: key.clone() },
                })
        })
    }

    /// Token scan over keys; product identifiers only when no key matches
    fn legacy(active: &ActiveEntitlements) -> Option<Resolution> {
        Self::legacy_scan(active, |key, _, token| key.to_ascii_lowercase().contains(token))
            .or_else(|| {
                Self::legacy_scan(active, |_, ent, token| {
                    ent.product_identifier.to_ascii_lowercase().contains(token)
                })
            })
    }

    fn legacy_scan<F>(active: &ActiveEntitlements, matches: F) -> Option<Resolution>
    where
        F: Fn(&str, &Entitlement, &str) -> bool,
    {
        LEGACY_TOKENS.iter().find_map(|(token, tier)| {
            active
                .iter()
                .find(|(key, ent)| matches(key.as_str(), ent, token))
                .map(|(key, _)| Resolution {
                    tier: *tier,
                    source: ResolutionSource::Legacy { key: key.clone() },
                })
        })
    }
}

/// Resolve the current tier with the default fallback policy
pub fn resolve_tier(active: &ActiveEntitlements) -> Tier {
    EntitlementResolver::default().resolve(active).tier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(ids: &[(&str, &str)]) -> ActiveEntitlements {
        ids.iter()
            .map(|(id, product)| (id.to_string(), Entitlement::new(id, product)))
            .collect()
    }

    #[test]
    fn test_empty_is_none() {
        let resolution = EntitlementResolver::default().resolve(&ActiveEntitlements::new());
        assert_eq!(resolution, Resolution::none());
    }

    #[test]
    fn test_canonical_priority() {
        let set = active(&[("gold_access", "g"), ("diamond_access", "d"), ("platinum_access", "p")]);
        let resolution = EntitlementResolver::default().resolve(&set);
        assert_eq!(resolution.tier, Tier::Diamond);
        assert_eq!(
            resolution.source,
            ResolutionSource::Canonical { key: "diamond_access".into() }
        );
    }

    #[test]
    fn test_platinum_access_scenario() {
        assert_eq!(resolve_tier(&active(&[("platinum_access", "sku")])), Tier::Platinum);
    }

    #[test]
    fn test_canonical_beats_legacy() {
        // Canonical ids are authoritative even if a legacy name looks higher
        let set = active(&[("gold_access", "g"), ("Diamond Promo", "promo")]);
        assert_eq!(resolve_tier(&set), Tier::Gold);
    }

    #[test]
    fn test_legacy_key_and_product_scan() {
        assert_eq!(resolve_tier(&active(&[("Platinum", "x")])), Tier::Platinum);
        assert_eq!(
            resolve_tier(&active(&[("premium", "com.pulse.diamond.yearly")])),
            Tier::Diamond
        );

        let set = active(&[("legacy_gold", "a"), ("pro", "pulse_platinum_monthly")]);
        let resolution = EntitlementResolver::default().resolve(&set);
        assert_eq!(resolution.tier, Tier::Gold);
        assert_eq!(resolution.source, ResolutionSource::Legacy { key: "legacy_gold".into() });
    }

    #[test]
    fn test_key_match_beats_higher_product_id() {
        let set = active(&[("legacy_gold", "sku_a"), ("pro", "pulse_diamond_annual")]);
        assert_eq!(resolve_tier(&set), Tier::Gold);

        // Product ids only count once no key matches
        let set = active(&[("basic", "sku_a"), ("pro", "pulse_diamond_annual")]);
        let resolution = EntitlementResolver::default().resolve(&set);
        assert_eq!(resolution.tier, Tier::Diamond);
        assert_eq!(resolution.source, ResolutionSource::Legacy { key: "pro".into() });
    }

    #[test]
    fn test_indeterminate_fallback() {
        let set = active(&[("zeta", "z"), ("alpha", "a")]);

        let resolution = EntitlementResolver::default().resolve(&set);
        assert_eq!(resolution.tier, Tier::Gold);
        assert_eq!(resolution.source, ResolutionSource::Indeterminate { key: "alpha".into() });

        let strict = EntitlementResolver::new(UnknownEntitlementPolicy::Ignore).resolve(&set);
        assert_eq!(strict.tier, Tier::None);
    }
}
