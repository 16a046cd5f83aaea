//! [`FundamentalsProvider`] backed by the FMP API.

use crate::{
    client::FmpClient,
    types::{CompanyProfile, HistoricalPrice, IncomeStatement, Period, Quote, SharesFloat},
};
use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, warn};
use ventas_traits::{
    FundamentalsProvider, FundamentalsSnapshot, Observation, Result, normalize_ticker,
};

/// Quarters of income statements fetched per ticker.
const DEFAULT_QUARTERS: u32 = 8;

/// Extra calendar days of price history fetched before the oldest quarter end.
const PRICE_HISTORY_PADDING_DAYS: i64 = 10;

/// Annual estimate periods requested per ticker.
const ESTIMATE_PERIODS: u32 = 10;

/// Fundamentals provider that assembles a snapshot from several FMP endpoints.
///
/// Quote, profile, share float and quarterly income statements are fetched
/// in parallel; daily prices follow once the quarter range is known. Only
/// the quote is mandatory: an unknown symbol fails with
/// `DataUnavailable`, while every other missing piece degrades the snapshot.
#[derive(Debug, Clone)]
pub struct FmpProvider {
    client: FmpClient,
    quarters: u32,
}

impl FmpProvider {
    /// Create a provider around an existing client.
    #[must_use]
    pub const fn new(client: FmpClient) -> Self {
        Self {
            client,
            quarters: DEFAULT_QUARTERS,
        }
    }

    /// Create a provider from the `FMP_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or the HTTP
    /// client cannot be built.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(FmpClient::from_env()?))
    }

    /// Set how many quarters of history to fetch (at least four).
    #[must_use]
    pub fn with_quarters(mut self, quarters: u32) -> Self {
        self.quarters = quarters.max(4);
        self
    }

    /// The underlying API client.
    #[must_use]
    pub const fn client(&self) -> &FmpClient {
        &self.client
    }
}

#[async_trait]
impl FundamentalsProvider for FmpProvider {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot> {
        let symbol = normalize_ticker(ticker);

        let (quote, profile, float, income) = tokio::join!(
            self.client.quote(&symbol),
            self.client.profile(&symbol),
            self.client.shares_float(&symbol),
            self.client
                .income_statement(&symbol, Period::Quarter, Some(self.quarters)),
        );

        let quote = quote?;
        let profile = profile
            .inspect_err(|e| debug!(%symbol, error = %e, "Profile unavailable"))
            .ok();
        let float = float
            .inspect_err(|e| debug!(%symbol, error = %e, "Share float unavailable"))
            .ok();
        let income = income.unwrap_or_else(|e| {
            warn!(%symbol, error = %e, "Quarterly income statements unavailable");
            Vec::new()
        });

        let prices = match income.iter().filter_map(IncomeStatement::parsed_date).min() {
            Some(oldest) => {
                let from = (oldest - Duration::days(PRICE_HISTORY_PADDING_DAYS))
                    .format("%Y-%m-%d")
                    .to_string();
                self.client
                    .historical_prices(&symbol, Some(&from), None)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(%symbol, error = %e, "Price history unavailable");
                        Vec::new()
                    })
            }
            None => Vec::new(),
        };

        let snapshot = assemble_snapshot(
            &symbol,
            &quote,
            profile.as_ref(),
            float.as_ref(),
            &income,
            &prices,
        );
        debug!(
            %symbol,
            quarters = snapshot.quarterly_revenue.len(),
            prices = snapshot.quarterly_prices.len(),
            "Assembled FMP snapshot"
        );
        Ok(snapshot)
    }

    async fn revenue_estimates(&self, ticker: &str) -> Result<Vec<Observation>> {
        let symbol = normalize_ticker(ticker);
        let estimates = self
            .client
            .analyst_estimates(&symbol, Period::Annual, Some(ESTIMATE_PERIODS))
            .await?;

        let mut observations: Vec<Observation> = estimates
            .iter()
            .filter(|e| e.revenue_avg > 0.0)
            .filter_map(|e| e.parsed_date().map(|d| Observation::new(d, e.revenue_avg)))
            .collect();
        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }
}

/// Combine raw FMP responses into a snapshot.
///
/// Shares outstanding prefer the published float, then the count implied by
/// quote market cap, then the latest weighted average from the income
/// statement. TTM revenue is the sum of the four latest quarters when
/// available.
pub(crate) fn assemble_snapshot(
    symbol: &str,
    quote: &Quote,
    profile: Option<&CompanyProfile>,
    float: Option<&SharesFloat>,
    income: &[IncomeStatement],
    prices: &[HistoricalPrice],
) -> FundamentalsSnapshot {
    let mut snapshot = FundamentalsSnapshot::new(symbol);

    snapshot.name = profile
        .and_then(|p| p.company_name.clone())
        .or_else(|| quote.name.clone());
    snapshot.currency = profile
        .and_then(|p| p.currency.clone())
        .or_else(|| income.iter().find_map(|s| s.reported_currency.clone()));

    let mut quarterly: Vec<(chrono::NaiveDate, &IncomeStatement)> = income
        .iter()
        .filter_map(|s| s.parsed_date().map(|d| (d, s)))
        .collect();
    // Most recent first
    quarterly.sort_by(|a, b| b.0.cmp(&a.0));

    snapshot.quarterly_revenue = quarterly
        .iter()
        .map(|(date, s)| Observation::new(*date, s.revenue))
        .collect();

    if quarterly.len() >= 4 {
        snapshot.revenue_ttm = Some(quarterly[..4].iter().map(|(_, s)| s.revenue).sum());
    }

    snapshot.shares_outstanding = float
        .map(|f| f.outstanding_shares)
        .filter(|s| *s > 0.0)
        .or_else(|| quote.implied_shares())
        .or_else(|| {
            quarterly
                .first()
                .map(|(_, s)| s.weighted_average_shs_out)
                .filter(|s| *s > 0.0)
        });

    snapshot.quarterly_prices = prices
        .iter()
        .filter_map(|p| p.parsed_date().map(|d| Observation::new(d, p.close)))
        .collect();

    snapshot.current_price = if quote.price > 0.0 {
        Some(quote.price)
    } else {
        snapshot
            .quarterly_prices
            .iter()
            .max_by_key(|p| p.date)
            .map(|p| p.value)
    };

    snapshot
}
