//! Screener Query Compiler
//!
//! Pure translation of a human-readable filter selection into endpoint
//! query parameters. Total: unknown filters and labels are skipped, never
//! rejected.

use pulse_common::DEFAULT_SCREENER_LIMIT;

use crate::filters::{AssetType, ScreenerFilter, ScreenerFilterSelection};
use crate::query::{Bounds, Metric, ScreenerQueryParams};

/// Filter-to-query compiler
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler {
    limit: u32,
}

impl QueryCompiler {
    /// Compiler with a result-count limit
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// Result-count limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Compile a selection
    pub fn compile(&self, selection: &ScreenerFilterSelection) -> ScreenerQueryParams {
        let mut params = ScreenerQueryParams::with_limit(self.limit);
        for filter in selection.parsed() {
            Self::apply(&mut params, &filter);
        }
        params
    }

    fn apply(params: &mut ScreenerQueryParams, filter: &ScreenerFilter) {
        if let Some(label) = filter.unknown_label() {
            tracing::debug!(filter = ?filter.id(), %label, "skipping unknown screener label");
            return;
        }

        match filter {
            ScreenerFilter::MarketCap(bucket) => {
                Self::set_range(params, Metric::MarketCap, bucket.bounds())
            }
            ScreenerFilter::Price(bucket) => Self::set_range(params, Metric::Price, bucket.bounds()),
            ScreenerFilter::Pe(bucket) => Self::set_range(params, Metric::Pe, bucket.bounds()),
            ScreenerFilter::DividendYield(bucket) => {
                Self::set_range(params, Metric::DividendYield, bucket.bounds())
            }
            ScreenerFilter::DebtToEquity(bucket) => {
                Self::set_range(params, Metric::DebtToEquity, bucket.bounds())
            }
            ScreenerFilter::Beta(bucket) => Self::set_range(params, Metric::Beta, bucket.bounds()),
            ScreenerFilter::Volume(bucket) => {
                Self::set_range(params, Metric::Volume, bucket.bounds())
            }
            ScreenerFilter::Sector(sector) => {
                if let Some(value) = sector.value() {
                    params.sector = Some(value.to_string());
                }
            }
            ScreenerFilter::Exchange(exchange) => {
                if let Some(value) = exchange.value() {
                    params.exchange = Some(value.to_string());
                }
            }
            ScreenerFilter::Country(country) => {
                if let Some(value) = country.value() {
                    params.country = Some(value.to_string());
                }
            }
            ScreenerFilter::AssetType(asset) => match asset {
                AssetType::Stocks => {
                    params.is_etf = Some(false);
                    params.is_fund = Some(false);
                }
                AssetType::Etfs => params.is_etf = Some(true),
                AssetType::Funds => params.is_fund = Some(true),
                AssetType::Any | AssetType::Unknown(_) => {}
            },
            ScreenerFilter::Unrecognized { id, label } => {
                tracing::debug!(%id, %label, "skipping unrecognized screener filter");
            }
        }
    }

    fn set_range(params: &mut ScreenerQueryParams, metric: Metric, bounds: Option<Bounds>) {
        if let Some(bounds) = bounds {
            params.set_bounds(metric, bounds);
        }
    }
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_SCREENER_LIMIT)
    }
}

/// Compile with the default limit
pub fn compile(selection: &ScreenerFilterSelection) -> ScreenerQueryParams {
    QueryCompiler::default().compile(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(pairs: &[(&str, &str)]) -> ScreenerFilterSelection {
        pairs.iter().copied().collect()
    }

    fn pairs(params: &ScreenerQueryParams) -> Vec<(&'static str, String)> {
        params.to_query_pairs()
    }

    fn has(params: &ScreenerQueryParams, key: &str) -> bool {
        pairs(params).iter().any(|(k, _)| *k == key)
    }

    fn value(params: &ScreenerQueryParams, key: &str) -> Option<String> {
        pairs(params).into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    #[test]
    fn test_empty_selection_defaults_only() {
        let params = compile(&ScreenerFilterSelection::new());
        assert!(!params.has_range_bounds());
        assert_eq!(
            pairs(&params),
            vec![
                ("isActivelyTrading", "true".to_string()),
                ("limit", "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_price_under_10() {
        let params = compile(&select(&[("price", "Under $10")]));
        assert_eq!(params.bound(Metric::Price), Some(Bounds::below(10.0)));
        assert_eq!(value(&params, "priceLowerThan").as_deref(), Some("10"));
        assert!(!has(&params, "priceMoreThan"));
    }

    #[test]
    fn test_price_10_to_50() {
        let params = compile(&select(&[("price", "$10 - $50")]));
        assert_eq!(value(&params, "priceMoreThan").as_deref(), Some("10"));
        assert_eq!(value(&params, "priceLowerThan").as_deref(), Some("50"));
    }

    #[test]
    fn test_no_debt_tolerance() {
        let params = compile(&select(&[("debtToEquity", "No Debt")]));
        assert_eq!(value(&params, "debtToEquityLessThan").as_deref(), Some("0.01"));
        assert!(!has(&params, "debtToEquityMoreThan"));
    }

    #[test]
    fn test_pe_range_uses_less_than() {
        let params = compile(&select(&[("pe", "10–15")]));
        assert_eq!(value(&params, "peMoreThan").as_deref(), Some("10"));
        assert_eq!(value(&params, "peLessThan").as_deref(), Some("15"));
    }

    #[test]
    fn test_market_cap_mid() {
        let params = compile(&select(&[("marketCap", "Mid ($2B-$10B)")]));
        assert_eq!(value(&params, "marketCapMoreThan").as_deref(), Some("2000000000"));
        assert_eq!(value(&params, "marketCapLowerThan").as_deref(), Some("10000000000"));
    }

    #[test]
    fn test_enumerated_values() {
        let params = compile(&select(&[
            ("sector", "Technology"),
            ("exchange", "NASDAQ"),
            ("country", "United States"),
            ("assetType", "ETFs"),
        ]));
        assert_eq!(params.sector.as_deref(), Some("Technology"));
        assert_eq!(params.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(params.country.as_deref(), Some("US"));
        assert_eq!(params.is_etf, Some(true));
        assert_eq!(params.is_fund, None);
    }

    #[test]
    fn test_stocks_excludes_etfs_and_funds() {
        let params = compile(&select(&[("assetType", "Stocks")]));
        assert_eq!(params.is_etf, Some(false));
        assert_eq!(params.is_fund, Some(false));
    }

    #[test]
    fn test_unknown_inputs_ignored() {
        let params = compile(&select(&[
            ("esgScore", "AAA"),
            ("price", "Under $3"),
            ("sector", "Crypto"),
            ("beta", "Any"),
        ]));
        assert_eq!(params, compile(&ScreenerFilterSelection::new()));
    }

    #[test]
    fn test_idempotent() {
        let selection = select(&[
            ("marketCap", "Large ($10B-$200B)"),
            ("volume", "1M - 10M"),
            ("dividendYield", "Over 2%"),
        ]);
        assert_eq!(compile(&selection), compile(&selection));
    }

    #[test]
    fn test_custom_limit() {
        let params = QueryCompiler::new(25).compile(&select(&[("beta", "High (1.5 - 2)")]));
        assert_eq!(params.limit, 25);
        assert!(params.is_actively_trading);
        assert_eq!(params.bound(Metric::Beta), Some(Bounds::between(1.5, 2.0)));
    }
}
