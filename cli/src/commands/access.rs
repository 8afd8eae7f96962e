//! Access commands

use colored::Colorize;
use tabled::Tabled;

use pulse_entitlements::{gate, upsell_packages, AccessDecision, Feature, Package, FEATURE_REQUIREMENTS};

use crate::output::{KeyValue, OutputFormat};
use crate::AccessCommands;

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Feature")]
    feature: &'static str,
    #[tabled(rename = "Required tier")]
    required: String,
}

pub async fn handle(action: AccessCommands, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        AccessCommands::Check { feature, tier, packages } => {
            let feature = Feature::from_name(&feature)
                .ok_or_else(|| anyhow::anyhow!("unknown feature: {feature}"))?;
            let decision = gate(feature, tier);

            let offerings: Vec<Package> = match packages {
                Some(path) => serde_json::from_str(&tokio::fs::read_to_string(path).await?)?,
                None => Vec::new(),
            };

            match decision {
                AccessDecision::Granted => {
                    let rows = [KeyValue::new(feature.name(), "granted".green())];
                    format.print(&decision, rows)?;
                }
                AccessDecision::Upsell { required, current, .. } => {
                    let suggested = upsell_packages(required, &offerings);
                    let mut rows = vec![
                        KeyValue::new(feature.name(), "upsell".yellow()),
                        KeyValue::new("required", required),
                        KeyValue::new("current", current),
                    ];
                    rows.extend(suggested.iter().map(|pkg| {
                        KeyValue::new(format!("package {}", pkg.identifier), &pkg.price_string)
                    }));
                    let data = serde_json::json!({ "decision": decision, "packages": suggested });
                    format.print(&data, rows)?;
                }
            }
        }
        AccessCommands::List => {
            let rows = FEATURE_REQUIREMENTS.iter().map(|(feature, tier)| FeatureRow {
                feature: feature.name(),
                required: tier.to_string(),
            });
            let data: Vec<_> = FEATURE_REQUIREMENTS
                .iter()
                .map(|(feature, tier)| serde_json::json!({ "feature": feature, "required": tier }))
                .collect();
            format.print(&data, rows)?;
        }
    }
    Ok(())
}
