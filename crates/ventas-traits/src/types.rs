//! Common types used throughout the ventas toolkit.
//!
//! This module defines the fundamentals snapshot consumed by the valuation
//! engine, the growth schedule supplied by the caller, and the record that
//! the engine produces and a [`RecordStore`](crate::RecordStore) persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol, upper-cased (e.g. "AAPL").
pub type Ticker = String;

/// Default currency assumed when the provider reports none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Normalize a ticker for use as a record key.
///
/// Trims surrounding whitespace and upper-cases the symbol.
#[must_use]
pub fn normalize_ticker(ticker: &str) -> Ticker {
    ticker.trim().to_uppercase()
}

/// A single dated observation (a quarterly revenue figure or a closing price).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date. For revenue this is the fiscal quarter end.
    pub date: Date,
    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Create a new observation.
    #[must_use]
    pub const fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// Raw per-ticker financial facts as supplied by a
/// [`FundamentalsProvider`](crate::FundamentalsProvider).
///
/// Immutable once fetched. Series may arrive most-recent-first or
/// chronologically; consumers normalize ordering before use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    /// Upper-cased ticker symbol.
    pub ticker: Ticker,
    /// Company display name.
    pub name: Option<String>,
    /// Reporting currency.
    pub currency: Option<String>,
    /// Latest traded price. Absence disables the undervaluation signal.
    pub current_price: Option<f64>,
    /// Shares outstanding. Must be positive to value the company.
    pub shares_outstanding: Option<f64>,
    /// Trailing-twelve-month revenue.
    pub revenue_ttm: Option<f64>,
    /// Quarterly revenue figures keyed by fiscal quarter end.
    pub quarterly_revenue: Vec<Observation>,
    /// Price observations near (or spanning) the quarter-end dates.
    pub quarterly_prices: Vec<Observation>,
}

impl FundamentalsSnapshot {
    /// Create an empty snapshot for `ticker`, normalizing the symbol.
    #[must_use]
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            ..Self::default()
        }
    }

    /// Display name, falling back to the ticker.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.ticker)
    }

    /// Reporting currency, falling back to USD.
    #[must_use]
    pub fn currency_or_default(&self) -> &str {
        self.currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }
}

/// Percentage growth rates for successive forecast years.
///
/// `10.0` means +10%, `0.0` flat, negative values a decline. The engine
/// treats the schedule as opaque input; how it was obtained (manual entry,
/// analyst estimates) is the caller's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowthAssumptions {
    rates: Vec<f64>,
}

impl GrowthAssumptions {
    /// Create a schedule from per-year percentage rates.
    #[must_use]
    pub const fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    /// The per-year rates, first forecast year first.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Number of forecast years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the schedule is empty (no growth applied).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<Vec<f64>> for GrowthAssumptions {
    fn from(rates: Vec<f64>) -> Self {
        Self::new(rates)
    }
}

impl From<&[f64]> for GrowthAssumptions {
    fn from(rates: &[f64]) -> Self {
        Self::new(rates.to_vec())
    }
}

/// A computed valuation, the unit persisted by a
/// [`RecordStore`](crate::RecordStore).
///
/// `ticker` is the store key. Every numeric field is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
    /// Upper-cased ticker symbol.
    pub ticker: Ticker,
    /// Company display name (ticker when unknown).
    pub name: String,
    /// Reporting currency (USD when unknown).
    pub currency: String,
    /// Trailing-twelve-month revenue used as the projection base.
    pub revenue_ttm: f64,
    /// Growth rates applied, first forecast year first.
    pub growth_rates: Vec<f64>,
    /// Revenue after compounding every growth rate.
    pub projected_revenue: f64,
    /// Historical P/S multiple applied to projected revenue.
    pub ps_average: f64,
    /// Number of historical P/S samples averaged; zero when the fallback applied.
    #[serde(default)]
    pub ps_samples: usize,
    /// Whether `ps_average` is the fallback multiple rather than a computed average.
    #[serde(default)]
    pub ps_fallback: bool,
    /// Whether revenue was zero or missing, making the target meaningless.
    #[serde(default)]
    pub low_confidence: bool,
    /// Fair-value estimate per share.
    pub target_price: f64,
    /// Latest traded price, if known.
    pub current_price: Option<f64>,
    /// `(target - current) / current * 100`; absent without a usable price.
    pub undervaluation_percent: Option<f64>,
    /// When this record was computed.
    pub last_updated: DateTime<Utc>,
}

impl ValuationRecord {
    /// Growth schedule this record was computed with.
    #[must_use]
    pub fn growth(&self) -> GrowthAssumptions {
        GrowthAssumptions::new(self.growth_rates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker(" aapl "), "AAPL");
        assert_eq!(normalize_ticker("brk.b"), "BRK.B");
    }

    #[test]
    fn test_snapshot_new_normalizes() {
        let snapshot = FundamentalsSnapshot::new("msft");
        assert_eq!(snapshot.ticker, "MSFT");
        assert!(snapshot.quarterly_revenue.is_empty());
    }

    #[test]
    fn test_snapshot_fallbacks() {
        let mut snapshot = FundamentalsSnapshot::new("nvda");
        assert_eq!(snapshot.display_name(), "NVDA");
        assert_eq!(snapshot.currency_or_default(), "USD");

        snapshot.name = Some("NVIDIA Corporation".to_string());
        snapshot.currency = Some("  ".to_string());
        assert_eq!(snapshot.display_name(), "NVIDIA Corporation");
        assert_eq!(snapshot.currency_or_default(), "USD");
    }

    #[test]
    fn test_growth_assumptions() {
        let growth = GrowthAssumptions::from(vec![10.0, 20.0, 0.0]);
        assert_eq!(growth.len(), 3);
        assert_eq!(growth.rates(), &[10.0, 20.0, 0.0]);
        assert!(GrowthAssumptions::default().is_empty());
    }

    #[test]
    fn test_growth_serializes_as_list() {
        let growth = GrowthAssumptions::new(vec![5.0, -2.5]);
        let json = serde_json::to_string(&growth).unwrap();
        assert_eq!(json, "[5.0,-2.5]");
    }

    #[test]
    fn test_record_defaults_missing_flags() {
        let json = r#"{
            "ticker": "AAPL",
            "name": "Apple",
            "currency": "USD",
            "revenue_ttm": 100.0,
            "growth_rates": [10.0],
            "projected_revenue": 110.0,
            "ps_average": 5.0,
            "target_price": 55.0,
            "current_price": null,
            "undervaluation_percent": null,
            "last_updated": "2024-01-02T00:00:00Z"
        }"#;
        let record: ValuationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.ps_samples, 0);
        assert!(!record.ps_fallback);
        assert!(!record.low_confidence);
        assert_eq!(record.growth().rates(), &[10.0]);
    }
}
