//! Tier commands

use std::path::Path;
use std::sync::Arc;

use pulse_common::{PulseConfig, UnknownEntitlementPolicy};
use pulse_entitlements::{
    features_for, CustomerInfo, EntitlementResolver, InMemoryBillingProvider, ResolutionSource,
    SubscriptionStore,
};

use crate::output::{KeyValue, OutputFormat};
use crate::TierCommands;

pub async fn handle(action: TierCommands, config: &PulseConfig, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        TierCommands::Resolve { file, strict } => {
            let policy = if strict {
                UnknownEntitlementPolicy::Ignore
            } else {
                config.billing.unknown_entitlement_policy
            };
            let store = store_for(&file, policy).await?;
            let snapshot = store.refresh().await;

            let mut rows = vec![
                KeyValue::new("tier", snapshot.tier),
                KeyValue::new("source", describe(&snapshot.resolution.source)),
            ];
            for (key, entitlement) in &snapshot.entitlements {
                let expires = entitlement
                    .expiration_date
                    .map_or_else(|| "never".to_string(), |at| at.to_rfc3339());
                rows.push(KeyValue::new(
                    format!("entitlement {key}"),
                    format!("{} (expires {expires})", entitlement.product_identifier),
                ));
            }
            format.print(snapshot.as_ref(), rows)?;
        }
        TierCommands::Features { tier } => {
            let features = features_for(tier);
            let rows = features
                .iter()
                .map(|feature| KeyValue::new(feature.name(), feature.required_tier()));
            format.print(&features, rows)?;
        }
    }
    Ok(())
}

async fn store_for(file: &Path, policy: UnknownEntitlementPolicy) -> anyhow::Result<SubscriptionStore> {
    let raw = tokio::fs::read_to_string(file).await?;
    let info: CustomerInfo = serde_json::from_str(&raw)?;
    let provider = InMemoryBillingProvider::with_customer(info);
    Ok(SubscriptionStore::new(
        Arc::new(provider),
        EntitlementResolver::new(policy),
    ))
}

fn describe(source: &ResolutionSource) -> String {
    match source {
        ResolutionSource::Canonical { key } => format!("canonical ({key})"),
        ResolutionSource::Legacy { key } => format!("legacy match ({key})"),
        ResolutionSource::Indeterminate { key } => format!("unrecognized ({key})"),
        ResolutionSource::Empty => "no active entitlements".to_string(),
    }
}
