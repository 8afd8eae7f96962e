//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data` as JSON/YAML, or `rows` as a table
    pub fn print<T, R>(&self, data: &T, rows: impl IntoIterator<Item = R>) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        R: Tabled,
    {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Table => {
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
            }
        }
        Ok(())
    }

    pub fn is_table(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

/// Two-column row for key/value listings
#[derive(Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}
