//! Data types for FMP API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statement or estimate granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Fiscal-year figures.
    Annual,
    /// Quarterly figures.
    #[default]
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    // Some endpoints append a time component.
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Income statement data from FMP, trimmed to the fields the valuation uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Fiscal period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period (FY, Q1..Q4).
    pub period: String,
    /// Reporting currency.
    #[serde(default)]
    pub reported_currency: Option<String>,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
    /// Weighted average shares outstanding.
    #[serde(default)]
    pub weighted_average_shs_out: f64,
    /// Weighted average diluted shares outstanding.
    #[serde(default)]
    pub weighted_average_shs_out_dil: f64,
}

impl IncomeStatement {
    /// Period end date, if it parses.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Latest quote for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current price.
    pub price: f64,
    /// Market cap.
    #[serde(default)]
    pub market_cap: f64,
    /// Previous close.
    #[serde(default)]
    pub previous_close: f64,
}

impl Quote {
    /// Share count implied by market cap and price.
    #[must_use]
    pub fn implied_shares(&self) -> Option<f64> {
        (self.price > 0.0 && self.market_cap > 0.0).then(|| self.market_cap / self.price)
    }
}

/// Company profile from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Trading currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: f64,
    /// Market cap.
    #[serde(default)]
    pub market_cap: f64,
}

/// Share float data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharesFloat {
    /// Ticker symbol.
    pub symbol: String,
    /// As-of date.
    #[serde(default)]
    pub date: Option<String>,
    /// Shares outstanding.
    #[serde(default)]
    pub outstanding_shares: f64,
    /// Freely traded shares.
    #[serde(default)]
    pub float_shares: f64,
}

/// Historical price data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Close price.
    pub close: f64,
    /// Adjusted close.
    #[serde(rename = "adjClose", default)]
    pub adj_close: Option<f64>,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Trading day, ignoring any time component.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Analyst consensus estimate for one fiscal period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystEstimate {
    /// Ticker symbol.
    pub symbol: String,
    /// Fiscal period end date.
    pub date: String,
    /// Mean revenue estimate.
    #[serde(default)]
    pub revenue_avg: f64,
    /// Low revenue estimate.
    #[serde(default)]
    pub revenue_low: f64,
    /// High revenue estimate.
    #[serde(default)]
    pub revenue_high: f64,
    /// Number of analysts behind the revenue estimate.
    #[serde(default)]
    pub num_analysts_revenue: u32,
}

impl AnalystEstimate {
    /// Fiscal period end date, if it parses.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_statement_parse() {
        let json = r#"[{
            "date": "2024-09-28",
            "symbol": "AAPL",
            "reportedCurrency": "USD",
            "period": "Q4",
            "revenue": 94930000000,
            "weightedAverageShsOut": 15171990000
        }]"#;
        let statements: Vec<IncomeStatement> = serde_json::from_str(json).unwrap();
        assert_eq!(statements[0].period, "Q4");
        assert_eq!(statements[0].revenue, 94_930_000_000.0);
        assert_eq!(statements[0].weighted_average_shs_out_dil, 0.0);
        assert_eq!(
            statements[0].parsed_date(),
            NaiveDate::from_ymd_opt(2024, 9, 28)
        );
    }

    #[test]
    fn test_quote_implied_shares() {
        let json = r#"{"symbol": "ACME", "price": 20.0, "marketCap": 2000.0}"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.implied_shares(), Some(100.0));
        assert!(quote.name.is_none());
    }

    #[test]
    fn test_historical_price_datetime() {
        let json = r#"{"date": "2024-03-28 00:00:00", "close": 171.48, "volume": 65672690}"#;
        let price: HistoricalPrice = serde_json::from_str(json).unwrap();
        assert_eq!(price.parsed_date(), NaiveDate::from_ymd_opt(2024, 3, 28));
        assert!(price.adj_close.is_none());
    }

    #[test]
    fn test_period_as_str() {
        assert_eq!(Period::Quarter.as_str(), "quarter");
        assert_eq!(Period::default(), Period::Quarter);
    }
}
