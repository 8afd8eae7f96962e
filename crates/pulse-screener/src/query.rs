//! Screener query parameters
//!
//! Wire names are fixed by the market-data search endpoint. Ranges are
//! half-open: the lower bound is inclusive, the upper bound exclusive.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Numeric screener metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Market capitalization (USD)
    MarketCap,
    /// Last price (USD)
    Price,
    /// Price / earnings
    Pe,
    /// Dividend yield (percent)
    DividendYield,
    /// Debt / equity ratio
    DebtToEquity,
    /// Beta vs. the market
    Beta,
    /// Average daily volume (shares)
    Volume,
}

impl Metric {
    /// All metrics in wire order
    pub const ALL: [Metric; 7] = [
        Metric::MarketCap,
        Metric::Price,
        Metric::Pe,
        Metric::DividendYield,
        Metric::DebtToEquity,
        Metric::Beta,
        Metric::Volume,
    ];

    /// Query parameter for the lower bound
    pub const fn lower_param(self) -> &'static str {
        match self {
            Metric::MarketCap => "marketCapMoreThan",
            Metric::Price => "priceMoreThan",
            Metric::Pe => "peMoreThan",
            Metric::DividendYield => "dividendYieldMoreThan",
            Metric::DebtToEquity => "debtToEquityMoreThan",
            Metric::Beta => "betaMoreThan",
            Metric::Volume => "volumeMoreThan",
        }
    }

    /// Query parameter for the upper bound
    pub const fn upper_param(self) -> &'static str {
        match self {
            Metric::MarketCap => "marketCapLowerThan",
            Metric::Price => "priceLowerThan",
            Metric::Pe => "peLessThan",
            Metric::DividendYield => "dividendYieldLowerThan",
            Metric::DebtToEquity => "debtToEquityLessThan",
            Metric::Beta => "betaLowerThan",
            Metric::Volume => "volumeLowerThan",
        }
    }
}

/// Half-open numeric range `[more_than, less_than)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound
    pub more_than: Option<f64>,
    /// Exclusive upper bound
    pub less_than: Option<f64>,
}

impl Bounds {
    /// `value < upper`
    pub fn below(upper: f64) -> Self {
        Self { more_than: None, less_than: Some(upper) }
    }

    /// `value >= lower`
    pub fn at_least(lower: f64) -> Self {
        Self { more_than: Some(lower), less_than: None }
    }

    /// `lower <= value < upper`
    pub fn between(lower: f64, upper: f64) -> Self {
        Self { more_than: Some(lower), less_than: Some(upper) }
    }

    /// No constraint on either side
    pub fn is_unbounded(&self) -> bool {
        self.more_than.is_none() && self.less_than.is_none()
    }

    /// Half-open membership test
    pub fn contains(&self, value: f64) -> bool {
        self.more_than.map_or(true, |lo| value >= lo) && self.less_than.map_or(true, |hi| value < hi)
    }
}

/// Parameters for the market-data search endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerQueryParams {
    /// Numeric ranges
    pub bounds: BTreeMap<Metric, Bounds>,
    /// GICS-style sector name
    pub sector: Option<String>,
    /// Exchange short name
    pub exchange: Option<String>,
    /// ISO country code
    pub country: Option<String>,
    /// ETF flag
    pub is_etf: Option<bool>,
    /// Fund flag
    pub is_fund: Option<bool>,
    /// Restrict to actively traded instruments
    pub is_actively_trading: bool,
    /// Result-count limit
    pub limit: u32,
}

impl ScreenerQueryParams {
    /// Defaults only: limit and the active-trading restriction
    pub fn with_limit(limit: u32) -> Self {
        Self {
            bounds: BTreeMap::new(),
            sector: None,
            exchange: None,
            country: None,
            is_etf: None,
            is_fund: None,
            is_actively_trading: true,
            limit,
        }
    }

    /// Set a metric range; unbounded ranges clear the metric
    pub fn set_bounds(&mut self, metric: Metric, bounds: Bounds) {
        if bounds.is_unbounded() {
            self.bounds.remove(&metric);
        } else {
            self.bounds.insert(metric, bounds);
        }
    }

    /// Range for a metric
    pub fn bound(&self, metric: Metric) -> Option<Bounds> {
        self.bounds.get(&metric).copied()
    }

    /// Whether any numeric range is set
    pub fn has_range_bounds(&self) -> bool {
        !self.bounds.is_empty()
    }

    /// Query pairs in wire order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        for (metric, bounds) in &self.bounds {
            if let Some(lo) = bounds.more_than {
                pairs.push((metric.lower_param(), lo.to_string()));
            }
            if let Some(hi) = bounds.less_than {
                pairs.push((metric.upper_param(), hi.to_string()));
            }
        }

        if let Some(sector) = &self.sector {
            pairs.push(("sector", sector.clone()));
        }
        if let Some(exchange) = &self.exchange {
            pairs.push(("exchange", exchange.clone()));
        }
        if let Some(country) = &self.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(is_etf) = self.is_etf {
            pairs.push(("isEtf", is_etf.to_string()));
        }
        if let Some(is_fund) = self.is_fund {
            pairs.push(("isFund", is_fund.to_string()));
        }
        pairs.push(("isActivelyTrading", self.is_actively_trading.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }

    /// Local half-open check of a result row. Only fields the row carries
    /// are checked; the endpoint omits several metrics (P/E, debt/equity,
    /// dividend yield) and has already applied those constraints itself.
    pub fn admits(&self, row: &ScreenerRow) -> bool {
        let numeric_ok = self.bounds.iter().all(|(metric, bounds)| {
            row.metric(*metric).map_or(true, |value| bounds.contains(value))
        });

        numeric_ok
            && text_matches(self.sector.as_deref(), row.sector.as_deref())
            && text_matches(self.exchange.as_deref(), row.exchange_short_name.as_deref())
            && text_matches(self.country.as_deref(), row.country.as_deref())
            && flag_matches(self.is_etf, row.is_etf)
            && flag_matches(self.is_fund, row.is_fund)
            && (!self.is_actively_trading || row.is_actively_trading.unwrap_or(true))
    }
}

fn text_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(w), Some(a)) => w.eq_ignore_ascii_case(a),
        (Some(_), None) => true,
    }
}

fn flag_matches(wanted: Option<bool>, actual: Option<bool>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.map_or(true, |a| a == w),
    }
}

impl Serialize for ScreenerQueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs = self.to_query_pairs();
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in &pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One row returned by the search endpoint
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenerRow {
    /// Ticker
    pub symbol: String,
    /// Company name
    pub company_name: Option<String>,
    /// Market cap (USD)
    pub market_cap: Option<f64>,
    /// Last price
    pub price: Option<f64>,
    /// Price / earnings
    pub pe: Option<f64>,
    /// Dividend yield (percent)
    pub dividend_yield: Option<f64>,
    /// Debt / equity
    pub debt_to_equity: Option<f64>,
    /// Beta
    pub beta: Option<f64>,
    /// Volume
    pub volume: Option<f64>,
    /// Sector
    pub sector: Option<String>,
    /// Exchange short name
    pub exchange_short_name: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// ETF flag
    pub is_etf: Option<bool>,
    /// Fund flag
    pub is_fund: Option<bool>,
    /// Actively trading flag
    pub is_actively_trading: Option<bool>,
}

impl ScreenerRow {
    /// Value of a numeric metric
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::MarketCap => self.market_cap,
            Metric::Price => self.price,
            Metric::Pe => self.pe,
            Metric::DividendYield => self.dividend_yield,
            Metric::DebtToEquity => self.debt_to_equity,
            Metric::Beta => self.beta,
            Metric::Volume => self.volume,
        }
    }
}
