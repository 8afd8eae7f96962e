//! Market-data search client

use reqwest::Url;
use std::time::Duration;

use pulse_common::MarketDataConfig;

use crate::error::ScreenerError;
use crate::query::{ScreenerQueryParams, ScreenerRow};

/// Search endpoint path under the base URL
pub const SCREENER_PATH: &str = "company-screener";

/// REST client for the market-data search endpoint
pub struct MarketDataClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl MarketDataClient {
    /// Build from configuration; requires an API key
    pub fn new(config: &MarketDataConfig) -> Result<Self, ScreenerError> {
        let api_key = config.require_api_key()?.to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    /// Full request URL for a query
    pub fn screener_url(&self, params: &ScreenerQueryParams) -> Result<Url, ScreenerError> {
        screener_url(&self.base_url, params, Some(&self.api_key))
    }

    /// Run a search. Rows are re-checked locally against the half-open
    /// bounds since the endpoint ignores some metrics.
    pub async fn search(&self, params: &ScreenerQueryParams) -> Result<Vec<ScreenerRow>, ScreenerError> {
        let url = self.screener_url(params)?;
        tracing::debug!(path = url.path(), "screener search");

        let rows: Vec<ScreenerRow> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let total = rows.len();
        let admitted: Vec<ScreenerRow> = rows.into_iter().filter(|row| params.admits(row)).collect();
        tracing::debug!(total, admitted = admitted.len(), "screener results");
        Ok(admitted)
    }
}

/// Build the search URL. `api_key` is appended last when present.
pub fn screener_url(
    base_url: &str,
    params: &ScreenerQueryParams,
    api_key: Option<&str>,
) -> Result<Url, ScreenerError> {
    let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), SCREENER_PATH);
    let mut url = Url::parse(&endpoint).map_err(|e| ScreenerError::InvalidUrl(format!("{endpoint}: {e}")))?;

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.to_query_pairs() {
            query.append_pair(key, &value);
        }
        if let Some(key) = api_key {
            query.append_pair("apikey", key);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::filters::ScreenerFilterSelection;

    #[test]
    fn test_url_contains_wire_params() {
        let selection = ScreenerFilterSelection::new()
            .with("price", "$10 - $50")
            .with("sector", "Financial Services");
        let url = screener_url("https://api.example.com/stable/", &compile(&selection), None).unwrap();

        assert_eq!(url.path(), "/stable/company-screener");
        assert_eq!(
            url.query(),
            Some("priceMoreThan=10&priceLowerThan=50&sector=Financial+Services&isActivelyTrading=true&limit=100")
        );
    }

    #[test]
    fn test_api_key_appended() {
        let url = screener_url(
            "https://api.example.com",
            &compile(&ScreenerFilterSelection::new()),
            Some("k3y"),
        )
        .unwrap();
        let last = url.query_pairs().last().unwrap();
        assert_eq!(last.0, "apikey");
        assert_eq!(last.1, "k3y");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = screener_url("not a url", &compile(&ScreenerFilterSelection::new()), None).unwrap_err();
        assert!(matches!(err, ScreenerError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = MarketDataConfig::default();
        assert!(matches!(MarketDataClient::new(&config), Err(ScreenerError::Config(_))));

        let config = MarketDataConfig {
            api_key: Some("demo".into()),
            ..MarketDataConfig::default()
        };
        let client = MarketDataClient::new(&config).unwrap();
        let url = client.screener_url(&compile(&ScreenerFilterSelection::new())).unwrap();
        assert!(url.as_str().starts_with("https://financialmodelingprep.com/stable/company-screener?"));
    }
}
