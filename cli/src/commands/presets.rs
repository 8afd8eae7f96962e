//! Preset commands

use colored::Colorize;
use tabled::Tabled;

use pulse_common::PulseConfig;
use pulse_entitlements::Feature;
use pulse_screener::{FilePresetStore, PresetId, PresetStore};

use super::{require, selection_for};
use crate::output::OutputFormat;
use crate::PresetCommands;

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Filters")]
    filters: String,
    #[tabled(rename = "Saved")]
    saved: String,
}

pub async fn handle(action: PresetCommands, config: &PulseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let store = FilePresetStore::new(&config.presets.path);

    match action {
        PresetCommands::Save { user, name, filters, tier } => {
            require(Feature::ScreenerPresets, tier)?;
            let selection = selection_for(filters, Some(tier));
            let id = store.save(&user, &name, &selection).await?;
            println!("{} preset '{}' ({id})", "Saved".green(), name.trim());
        }
        PresetCommands::List { user } => {
            let presets = store.list(&user).await?;
            let rows = presets.iter().map(|preset| PresetRow {
                id: preset.id.to_string(),
                name: preset.name.clone(),
                filters: preset
                    .filters
                    .iter()
                    .map(|(id, label)| format!("{id}={label}"))
                    .collect::<Vec<_>>()
                    .join(", "),
                saved: preset.created_at.format("%Y-%m-%d %H:%M").to_string(),
            });
            format.print(&presets, rows)?;
        }
        PresetCommands::Delete { user, id } => {
            let id: PresetId = id.parse()?;
            store.delete(&user, id).await?;
            println!("{} preset {id}", "Deleted".red());
        }
    }
    Ok(())
}
