//! Feature requirement table

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Gated product features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Community chat rooms
    CommunityMessaging,
    /// Basic stock screener
    StockScreener,
    /// Portfolio tracking
    PortfolioTracking,
    /// More than the free watchlist allowance
    UnlimitedWatchlists,
    /// Saved screener presets
    ScreenerPresets,
    /// Price alerts
    PriceAlerts,
    /// Fundamentals-based screener filters (P/E, debt/equity, beta)
    AdvancedScreenerFilters,
    /// Real-time quotes instead of delayed
    RealTimeQuotes,
    /// Long-form research reports
    ResearchReports,
    /// Insider and institutional ownership data
    InsiderActivity,
    /// Portfolio risk and performance analytics
    PortfolioAnalytics,
    /// AI-generated research summaries
    AiSummaries,
    /// CSV export
    DataExport,
}

/// Minimum tier per feature
pub const FEATURE_REQUIREMENTS: &[(Feature, Tier)] = &[
    (Feature::CommunityMessaging, Tier::None),
    (Feature::StockScreener, Tier::None),
    (Feature::PortfolioTracking, Tier::None),
    (Feature::UnlimitedWatchlists, Tier::Gold),
    (Feature::ScreenerPresets, Tier::Gold),
    (Feature::PriceAlerts, Tier::Gold),
    (Feature::AdvancedScreenerFilters, Tier::Platinum),
    (Feature::RealTimeQuotes, Tier::Platinum),
    (Feature::ResearchReports, Tier::Platinum),
    (Feature::InsiderActivity, Tier::Platinum),
    (Feature::PortfolioAnalytics, Tier::Diamond),
    (Feature::AiSummaries, Tier::Diamond),
    (Feature::DataExport, Tier::Diamond),
];

impl Feature {
    /// All features in table order
    pub fn all() -> impl Iterator<Item = Feature> {
        FEATURE_REQUIREMENTS.iter().map(|(feature, _)| *feature)
    }

    /// Minimum tier required
    pub const fn required_tier(self) -> Tier {
        match self {
            Feature::CommunityMessaging | Feature::StockScreener | Feature::PortfolioTracking => {
                Tier::None
            }
            Feature::UnlimitedWatchlists | Feature::ScreenerPresets | Feature::PriceAlerts => {
                Tier::Gold
            }
            Feature::AdvancedScreenerFilters
            | Feature::RealTimeQuotes
            | Feature::ResearchReports
            | Feature::InsiderActivity => Tier::Platinum,
            Feature::PortfolioAnalytics | Feature::AiSummaries | Feature::DataExport => {
                Tier::Diamond
            }
        }
    }

    /// Stable snake_case name
    pub const fn name(self) -> &'static str {
        match self {
            Feature::CommunityMessaging => "community_messaging",
            Feature::StockScreener => "stock_screener",
            Feature::PortfolioTracking => "portfolio_tracking",
            Feature::UnlimitedWatchlists => "unlimited_watchlists",
            Feature::ScreenerPresets => "screener_presets",
            Feature::PriceAlerts => "price_alerts",
            Feature::AdvancedScreenerFilters => "advanced_screener_filters",
            Feature::RealTimeQuotes => "real_time_quotes",
            Feature::ResearchReports => "research_reports",
            Feature::InsiderActivity => "insider_activity",
            Feature::PortfolioAnalytics => "portfolio_analytics",
            Feature::AiSummaries => "ai_summaries",
            Feature::DataExport => "data_export",
        }
    }

    /// Lookup by name. Accepts `-` or spaces in place of `_`.
    pub fn from_name(name: &str) -> Option<Feature> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::all().find(|feature| feature.name() == normalized)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Required tier for a feature name; unknown features are free
pub fn required_tier_for(name: &str) -> Tier {
    Feature::from_name(name).map_or(Tier::None, Feature::required_tier)
}

/// Features unlocked at `tier`
pub fn features_for(tier: Tier) -> Vec<Feature> {
    Feature::all()
        .filter(|feature| feature.required_tier() <= tier)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_required_tier() {
        for (feature, tier) in FEATURE_REQUIREMENTS {
            assert_eq!(feature.required_tier(), *tier, "{feature}");
        }
    }

    #[test]
    fn test_name_round_trip() {
        for feature in Feature::all() {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
        assert_eq!(Feature::from_name("Research Reports"), Some(Feature::ResearchReports));
        assert_eq!(Feature::from_name("ai-summaries"), Some(Feature::AiSummaries));
    }

    #[test]
    fn test_unknown_feature_is_free() {
        assert_eq!(required_tier_for("options_flow"), Tier::None);
        assert_eq!(required_tier_for("research_reports"), Tier::Platinum);
    }

    #[test]
    fn test_features_for_tier() {
        let free = features_for(Tier::None);
        assert!(free.contains(&Feature::StockScreener));
        assert!(!free.contains(&Feature::ScreenerPresets));

        assert_eq!(features_for(Tier::Diamond).len(), FEATURE_REQUIREMENTS.len());
        assert!(features_for(Tier::Gold).len() < features_for(Tier::Platinum).len());
    }
}
