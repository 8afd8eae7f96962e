//! MarketPulse CLI
//!
//! Command-line driver for tier resolution, feature gating and the screener.
//!
//! # Usage
//!
//! ```bash
//! pulse tier resolve -f customer.json
//! pulse access check --feature research_reports --tier gold
//! pulse screener compile -f "price=Under \$10" -f "pe=10 - 15" --tier platinum
//! pulse presets save --user me --name "Cheap value" -f "pe=Under 10" --tier platinum
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_common::PulseConfig;
use pulse_entitlements::Tier;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(author = "MarketPulse")]
#[command(version)]
#[command(about = "MarketPulse Command Line Interface", long_about = None)]
struct Cli {
    /// Config file (JSON)
    #[arg(long, env = "PULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve subscription tiers
    Tier {
        #[command(subcommand)]
        action: TierCommands,
    },
    /// Feature access decisions
    Access {
        #[command(subcommand)]
        action: AccessCommands,
    },
    /// Compile and run screener queries
    Screener {
        #[command(subcommand)]
        action: ScreenerCommands,
    },
    /// Manage saved screener presets
    Presets {
        #[command(subcommand)]
        action: PresetCommands,
    },
}

#[derive(Subcommand)]
enum TierCommands {
    /// Resolve the tier from a customer-info JSON snapshot
    Resolve {
        #[arg(short, long)]
        file: PathBuf,
        /// Unrecognized entitlements grant nothing
        #[arg(long)]
        strict: bool,
    },
    /// List features unlocked at a tier
    Features {
        #[arg(long, default_value = "none")]
        tier: Tier,
    },
}

#[derive(Subcommand)]
enum AccessCommands {
    /// Gate one feature
    Check {
        #[arg(long)]
        feature: String,
        #[arg(long, default_value = "none")]
        tier: Tier,
        /// Offering packages (JSON array) to suggest on upsell
        #[arg(long)]
        packages: Option<PathBuf>,
    },
    /// Print the feature requirement table
    List,
}

#[derive(Subcommand)]
enum ScreenerCommands {
    /// Compile filters into query parameters
    Compile {
        #[arg(short, long = "filter", value_parser = commands::parse_filter)]
        filters: Vec<(String, String)>,
        /// Drop fundamentals filters the tier cannot use
        #[arg(long)]
        tier: Option<Tier>,
    },
    /// Print the search URL (without the API key)
    Url {
        #[arg(short, long = "filter", value_parser = commands::parse_filter)]
        filters: Vec<(String, String)>,
        #[arg(long)]
        tier: Option<Tier>,
    },
    /// Run a search against the market-data API
    Search {
        #[arg(short, long = "filter", value_parser = commands::parse_filter)]
        filters: Vec<(String, String)>,
        #[arg(long)]
        tier: Option<Tier>,
    },
    /// List filter ids and their options
    Options {
        /// Only this filter
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Subcommand)]
enum PresetCommands {
    /// Save (or replace) a preset
    Save {
        #[arg(long, env = "PULSE_USER")]
        user: String,
        #[arg(long)]
        name: String,
        #[arg(short, long = "filter", value_parser = commands::parse_filter)]
        filters: Vec<(String, String)>,
        /// Subscription tier; saving presets needs Gold
        #[arg(long, env = "PULSE_TIER", default_value = "none")]
        tier: Tier,
    },
    /// List presets, newest first
    List {
        #[arg(long, env = "PULSE_USER")]
        user: String,
    },
    /// Delete a preset by id
    Delete {
        #[arg(long, env = "PULSE_USER")]
        user: String,
        id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Tier { action } => commands::tier::handle(action, &config, cli.format).await,
        Commands::Access { action } => commands::access::handle(action, cli.format).await,
        Commands::Screener { action } => commands::screener::handle(action, &config, cli.format).await,
        Commands::Presets { action } => commands::presets::handle(action, &config, cli.format).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Explicit path, then `~/.marketpulse/config.json`, then defaults
fn load_config(explicit: Option<&std::path::Path>) -> anyhow::Result<PulseConfig> {
    if let Some(path) = explicit {
        return Ok(PulseConfig::load(path)?);
    }
    match dirs::home_dir().map(|home| home.join(".marketpulse").join("config.json")) {
        Some(path) if path.exists() => Ok(PulseConfig::load(path)?),
        _ => Ok(PulseConfig::from_env()?),
    }
}
