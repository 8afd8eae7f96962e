//! Access decisions
//!
//! Evaluated per feature at render time; no caching, no side effects.

use serde::{Deserialize, Serialize};

use crate::features::Feature;
use crate::model::Package;
use crate::tier::Tier;

/// `current >= required`; `Tier::None` requirements always pass
#[inline]
pub fn can_access(required: Tier, current: Tier) -> bool {
    required == Tier::None || current >= required
}

/// What the consuming screen should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Render the content
    Granted,
    /// Render the paywall prompt instead
    Upsell {
        /// Gated feature
        feature: Feature,
        /// Tier needed
        required: Tier,
        /// Tier the user has
        current: Tier,
    },
}

impl AccessDecision {
    /// Whether content may be shown
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Gate a feature against the current tier
#[inline]
pub fn gate(feature: Feature, current: Tier) -> AccessDecision {
    let required = feature.required_tier();
    if can_access(required, current) {
        AccessDecision::Granted
    } else {
        AccessDecision::Upsell {
            feature,
            required,
            current,
        }
    }
}

/// Packages that would unlock `required`, lowest sufficient tier first
pub fn upsell_packages(required: Tier, packages: &[Package]) -> Vec<&Package> {
    let mut eligible: Vec<&Package> = packages
        .iter()
        .filter(|pkg| pkg.tier().is_paid() && can_access(required, pkg.tier()))
        .collect();
    eligible.sort_by_key(|pkg| pkg.tier());
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_access_scenarios() {
        assert!(!can_access(Tier::Platinum, Tier::None));
        assert!(can_access(Tier::Gold, Tier::Platinum));
        assert!(!can_access(Tier::Diamond, Tier::Platinum));
    }

    #[test]
    fn test_free_always_allowed() {
        for tier in Tier::ALL {
            assert!(can_access(Tier::None, tier));
        }
    }

    #[test]
    fn test_reflexive() {
        for tier in Tier::ALL {
            assert!(can_access(tier, tier));
        }
    }

    #[test]
    fn test_gate() {
        assert!(gate(Feature::StockScreener, Tier::None).is_granted());
        assert_eq!(
            gate(Feature::ResearchReports, Tier::Gold),
            AccessDecision::Upsell {
                feature: Feature::ResearchReports,
                required: Tier::Platinum,
                current: Tier::Gold,
            }
        );
        assert!(gate(Feature::ResearchReports, Tier::Diamond).is_granted());
    }

    #[test]
    fn test_upsell_packages() {
        let packages = vec![
            Package::new("diamond_monthly", "pulse_diamond_monthly", "$29.99"),
            Package::new("gold_monthly", "pulse_gold_monthly", "$4.99"),
            Package::new("platinum_monthly", "pulse_platinum_monthly", "$14.99"),
            Package::new("tip", "tip_jar", "$0.99"),
        ];

        let offers = upsell_packages(Tier::Platinum, &packages);
        let ids: Vec<_> = offers.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["platinum_monthly", "diamond_monthly"]);

        // Free features still only offer paid packages
        assert_eq!(upsell_packages(Tier::None, &packages).len(), 3);
    }
}
