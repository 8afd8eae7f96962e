//! Screener commands

use tabled::Tabled;

use pulse_common::PulseConfig;
use pulse_screener::{screener_url, FilterId, MarketDataClient, QueryCompiler, ScreenerRow};

use super::selection_for;
use crate::output::{KeyValue, OutputFormat};
use crate::ScreenerCommands;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Market cap")]
    market_cap: String,
    #[tabled(rename = "Sector")]
    sector: String,
}

impl From<&ScreenerRow> for ResultRow {
    fn from(row: &ScreenerRow) -> Self {
        let num = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        Self {
            symbol: row.symbol.clone(),
            name: row.company_name.clone().unwrap_or_default(),
            price: num(row.price),
            market_cap: num(row.market_cap),
            sector: row.sector.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Filter")]
    id: &'static str,
    #[tabled(rename = "Labels")]
    labels: String,
    #[tabled(rename = "Advanced")]
    advanced: bool,
}

pub async fn handle(action: ScreenerCommands, config: &PulseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let compiler = QueryCompiler::new(config.market_data.screener_limit);

    match action {
        ScreenerCommands::Compile { filters, tier } => {
            let params = compiler.compile(&selection_for(filters, tier));
            let rows: Vec<KeyValue> = params
                .to_query_pairs()
                .into_iter()
                .map(|(key, value)| KeyValue::new(key, value))
                .collect();
            format.print(&params, rows)?;
        }
        ScreenerCommands::Url { filters, tier } => {
            let params = compiler.compile(&selection_for(filters, tier));
            let url = screener_url(&config.market_data.base_url, &params, None)?;
            println!("{url}");
        }
        ScreenerCommands::Search { filters, tier } => {
            let params = compiler.compile(&selection_for(filters, tier));
            let client = MarketDataClient::new(&config.market_data)?;
            let rows = client.search(&params).await?;
            if format.is_table() && rows.is_empty() {
                println!("No matches");
                return Ok(());
            }
            format.print(&rows, rows.iter().map(ResultRow::from))?;
        }
        ScreenerCommands::Options { filter } => {
            let ids: Vec<FilterId> = match filter {
                Some(id) => vec![FilterId::from_id(&id)
                    .ok_or_else(|| anyhow::anyhow!("unknown filter: {id}"))?],
                None => FilterId::ALL.to_vec(),
            };
            let data: Vec<_> = ids
                .iter()
                .map(|id| serde_json::json!({ "id": id.as_str(), "labels": id.labels(), "advanced": id.is_advanced() }))
                .collect();
            let rows = ids.iter().map(|id| OptionRow {
                id: id.as_str(),
                labels: id.labels().join(", "),
                advanced: id.is_advanced(),
            });
            format.print(&data, rows)?;
        }
    }
    Ok(())
}
