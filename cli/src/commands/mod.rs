//! CLI Commands

pub mod access;
pub mod presets;
pub mod screener;
pub mod tier;

use pulse_entitlements::{can_access, gate, AccessDecision, Feature, Tier};
use pulse_screener::ScreenerFilterSelection;

/// Parse `id=label`
pub fn parse_filter(arg: &str) -> Result<(String, String), String> {
    let (id, label) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected id=label, got '{arg}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing filter id in '{arg}'"));
    }
    Ok((id.to_string(), label.trim().to_string()))
}

/// Fail unless `tier` unlocks `feature`
pub fn require(feature: Feature, tier: Tier) -> anyhow::Result<()> {
    match gate(feature, tier) {
        AccessDecision::Granted => Ok(()),
        AccessDecision::Upsell { required, current, .. } => Err(anyhow::anyhow!(
            "{feature} requires the {required} tier (current: {current})"
        )),
    }
}

/// Build a selection, dropping fundamentals filters the tier cannot use
pub fn selection_for(filters: Vec<(String, String)>, tier: Option<Tier>) -> ScreenerFilterSelection {
    let selection: ScreenerFilterSelection = filters.into_iter().collect();

    for filter in selection.parsed() {
        match (filter.id(), filter.unknown_label()) {
            (None, _) => tracing::warn!(?filter, "unrecognized filter id, ignoring"),
            (Some(id), Some(label)) => tracing::warn!(%id, label, "unrecognized label, ignoring"),
            _ => {}
        }
    }

    let Some(tier) = tier else {
        return selection;
    };
    let required = Feature::AdvancedScreenerFilters.required_tier();
    if can_access(required, tier) {
        return selection;
    }

    let dropped = selection.advanced_ids();
    if !dropped.is_empty() {
        let ids: Vec<&str> = dropped.iter().map(|id| id.as_str()).collect();
        tracing::warn!(%tier, %required, dropped = ?ids, "advanced filters need a higher tier");
    }
    selection.without_advanced()
}
