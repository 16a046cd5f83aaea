//! HTTP access to the FMP stable API.

use crate::{
    Result,
    error::FmpError,
    types::{
        AnalystEstimate, CompanyProfile, HistoricalPrice, IncomeStatement, Period, Quote,
        SharesFloat,
    },
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::{env, time::Duration};
use tracing::debug;

const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type Params = Vec<(&'static str, String)>;

/// Thin typed wrapper over the handful of FMP endpoints ventas reads.
///
/// Every endpoint answers with a JSON array; single-object lookups take the
/// first element and report an empty array as a missing symbol.
#[derive(Debug, Clone)]
pub struct FmpClient {
    http: Client,
    api_key: String,
}

impl FmpClient {
    /// Client for `api_key` with a 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::Request`] if the HTTP client cannot be built
    /// (for example when no TLS backend can be initialised).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
        })
    }

    /// Client keyed from `FMP_API_KEY`, reading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::MissingApiKey`] if the variable is unset or blank,
    /// or the error from [`new`](Self::new).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = env::var("FMP_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FmpError::MissingApiKey)?;
        Self::new(api_key)
    }

    fn url(&self, path: &str, params: &[(&'static str, String)]) -> String {
        let key = ("apikey", self.api_key.clone());
        let mut url = format!("{FMP_BASE_URL}/{path}");
        for (i, (name, value)) in params.iter().chain(std::iter::once(&key)).enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<Vec<T>> {
        debug!(path, ?params, "FMP request");
        let response = self.http.get(self.url(path, &params)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        check_response(status, &body)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_first<T: DeserializeOwned>(
        &self,
        path: &str,
        symbol: &str,
        missing: fn(String) -> FmpError,
    ) -> Result<T> {
        self.fetch(path, symbol_param(symbol))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| missing(symbol.to_uppercase()))
    }

    /// Quarterly or annual income statements, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let mut params = symbol_param(symbol);
        params.push(("period", period.as_str().to_string()));
        push_limit(&mut params, limit);
        self.fetch("income-statement", params).await
    }

    /// Real-time quote.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] for an unknown symbol.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.fetch_first("quote", symbol, FmpError::SymbolNotFound).await
    }

    /// Company profile (name and trading currency).
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] for an unknown symbol.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        self.fetch_first("profile", symbol, FmpError::SymbolNotFound).await
    }

    /// Share float, including shares outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::NoData`] when no float is published.
    pub async fn shares_float(&self, symbol: &str) -> Result<SharesFloat> {
        self.fetch_first("shares-float", symbol, FmpError::NoData).await
    }

    /// Daily end-of-day prices, optionally bounded by `YYYY-MM-DD` dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut params = symbol_param(symbol);
        params.extend(from.map(|f| ("from", f.to_string())));
        params.extend(to.map(|t| ("to", t.to_string())));
        self.fetch("historical-price-eod/full", params).await
    }

    /// Analyst consensus estimates per fiscal period.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    pub async fn analyst_estimates(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<AnalystEstimate>> {
        let mut params = symbol_param(symbol);
        params.push(("period", period.as_str().to_string()));
        push_limit(&mut params, limit);
        self.fetch("analyst-estimates", params).await
    }
}

fn symbol_param(symbol: &str) -> Params {
    vec![("symbol", symbol.trim().to_uppercase())]
}

fn push_limit(params: &mut Params, limit: Option<u32>) {
    params.extend(limit.map(|l| ("limit", l.to_string())));
}

/// Map an HTTP status and body to an error, if it is one.
///
/// FMP sometimes answers 200 with an `{"Error Message": ...}` object.
fn check_response(status: StatusCode, body: &str) -> Result<()> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FmpError::RateLimitExceeded);
    }
    if !status.is_success() {
        return Err(FmpError::Api(format!("HTTP {status}: {body}")));
    }
    if body.contains("\"Error Message\"") || body.contains("\"error\"") {
        return Err(FmpError::Api(body.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key").unwrap();
        let mut params = symbol_param(" aapl ");
        params.push(("period", Period::Quarter.as_str().to_string()));
        push_limit(&mut params, Some(8));

        assert_eq!(
            client.url("income-statement", &params),
            "https://financialmodelingprep.com/stable/income-statement?symbol=AAPL&period=quarter&limit=8&apikey=test_key"
        );
        assert_eq!(
            client.url("stock-list", &[]),
            "https://financialmodelingprep.com/stable/stock-list?apikey=test_key"
        );
    }

    #[test]
    fn test_check_response() {
        assert!(check_response(StatusCode::OK, "[]").is_ok());
        assert!(matches!(
            check_response(StatusCode::TOO_MANY_REQUESTS, ""),
            Err(FmpError::RateLimitExceeded)
        ));
        assert!(matches!(
            check_response(StatusCode::FORBIDDEN, "denied"),
            Err(FmpError::Api(m)) if m.contains("403")
        ));
        assert!(matches!(
            check_response(StatusCode::OK, r#"{"Error Message": "Invalid API KEY"}"#),
            Err(FmpError::Api(_))
        ));
    }
}
