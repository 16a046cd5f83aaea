//! Valuation engine.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use ventas_traits::{
    FundamentalsSnapshot, GrowthAssumptions, Result, ValuationRecord, VentasError,
};

use crate::{
    config::ValuationConfig,
    projection::project_revenue,
    ps_history::{chronological, historical_ps},
    target::{target_price, undervaluation_percent},
};

/// Turns a fundamentals snapshot plus a growth schedule into a
/// [`ValuationRecord`].
///
/// The engine is stateless: the same snapshot and schedule always produce
/// the same numbers, and only `last_updated` depends on the clock.
///
/// The pipeline is:
/// 1. Resolve TTM revenue (reported, else the sum of the last four quarters)
/// 2. Compound it through each growth rate
/// 3. Average the historical P/S multiple, falling back to a fixed multiple
/// 4. Scale projected revenue per share by that multiple
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    /// Create an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VentasError::InvalidInput`] if the configuration is invalid.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Value `snapshot` under `growth`, stamping the record with the current time.
    ///
    /// # Errors
    ///
    /// - [`VentasError::InsufficientData`] when shares outstanding is missing or
    ///   not positive, or when revenue is negative or not finite
    /// - [`VentasError::InvalidInput`] when the growth schedule is too long or
    ///   contains a non-finite rate
    pub fn analyze(
        &self,
        snapshot: &FundamentalsSnapshot,
        growth: &GrowthAssumptions,
    ) -> Result<ValuationRecord> {
        self.analyze_at(snapshot, growth, Utc::now())
    }

    /// Like [`analyze`](Self::analyze) with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// See [`analyze`](Self::analyze).
    pub fn analyze_at(
        &self,
        snapshot: &FundamentalsSnapshot,
        growth: &GrowthAssumptions,
        now: DateTime<Utc>,
    ) -> Result<ValuationRecord> {
        let ticker = &snapshot.ticker;
        self.check_growth(growth)?;

        let shares = match snapshot.shares_outstanding {
            Some(s) if s.is_finite() && s > 0.0 => s,
            other => {
                return Err(VentasError::InsufficientData(format!(
                    "{ticker}: shares outstanding unusable ({other:?})"
                )));
            }
        };

        let revenue_ttm = resolve_revenue(snapshot)?;
        let low_confidence = revenue_ttm == 0.0;
        if low_confidence {
            warn!(%ticker, "No TTM revenue; target price will be zero");
        }

        let projected_revenue = project_revenue(revenue_ttm, growth.rates());
        if !projected_revenue.is_finite() {
            return Err(VentasError::InvalidInput(format!(
                "{ticker}: growth schedule {:?} overflows the revenue projection",
                growth.rates()
            )));
        }

        let ps = historical_ps(
            &snapshot.quarterly_revenue,
            &snapshot.quarterly_prices,
            shares,
            self.config.price_window_days,
            self.config.fallback_multiple,
        );
        if ps.fallback {
            warn!(
                %ticker,
                quarters = snapshot.quarterly_revenue.len(),
                multiple = ps.value,
                "No valid historical P/S sample; using fallback multiple"
            );
        } else {
            debug!(%ticker, samples = ps.samples, ps = ps.value, "Historical P/S average");
        }

        let target = target_price(projected_revenue, shares, ps.value)?;
        // Negative quotes are treated as no quote.
        let current_price = snapshot
            .current_price
            .filter(|p| p.is_finite() && *p >= 0.0);
        let undervaluation = undervaluation_percent(target, current_price);

        Ok(ValuationRecord {
            ticker: ticker.clone(),
            name: snapshot.display_name().to_string(),
            currency: snapshot.currency_or_default().to_string(),
            revenue_ttm,
            growth_rates: growth.rates().to_vec(),
            projected_revenue,
            ps_average: ps.value,
            ps_samples: ps.samples,
            ps_fallback: ps.fallback,
            low_confidence,
            target_price: target,
            current_price,
            undervaluation_percent: undervaluation,
            last_updated: now,
        })
    }

    fn check_growth(&self, growth: &GrowthAssumptions) -> Result<()> {
        if growth.len() > self.config.max_growth_years {
            return Err(VentasError::InvalidInput(format!(
                "at most {} growth years supported, got {}",
                self.config.max_growth_years,
                growth.len()
            )));
        }
        if let Some(rate) = growth.rates().iter().find(|r| !r.is_finite()) {
            return Err(VentasError::InvalidInput(format!(
                "growth rate must be finite, got {rate}"
            )));
        }
        Ok(())
    }
}

/// Reported TTM revenue, or the sum of the four latest quarters when no
/// figure is reported. A reported zero stays zero.
fn resolve_revenue(snapshot: &FundamentalsSnapshot) -> Result<f64> {
    match snapshot.revenue_ttm {
        Some(r) if !r.is_finite() || r < 0.0 => Err(VentasError::InsufficientData(format!(
            "{}: TTM revenue unusable ({r})",
            snapshot.ticker
        ))),
        Some(r) => Ok(r),
        None => Ok(latest_four_quarters(snapshot).unwrap_or(0.0)),
    }
}

fn latest_four_quarters(snapshot: &FundamentalsSnapshot) -> Option<f64> {
    let quarters = chronological(&snapshot.quarterly_revenue);
    if quarters.len() < 4 {
        return None;
    }
    let total: f64 = quarters[quarters.len() - 4..].iter().map(|q| q.value).sum();
    (total.is_finite() && total > 0.0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use ventas_traits::{Date, Observation};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap()
    }

    fn growth(rates: &[f64]) -> GrowthAssumptions {
        GrowthAssumptions::from(rates)
    }

    /// Eight quarters of 250 revenue, most recent first, with prices on every
    /// quarter end. 1_000 shares.
    fn rich_snapshot() -> FundamentalsSnapshot {
        let quarter_ends = [
            d(2024, 9, 30),
            d(2024, 6, 30),
            d(2024, 3, 31),
            d(2023, 12, 31),
            d(2023, 9, 30),
            d(2023, 6, 30),
            d(2023, 3, 31),
            d(2022, 12, 31),
        ];
        let mut snapshot = FundamentalsSnapshot::new("acme");
        snapshot.name = Some("Acme Corp".to_string());
        snapshot.currency = Some("SEK".to_string());
        snapshot.current_price = Some(2.0);
        snapshot.shares_outstanding = Some(1_000.0);
        snapshot.revenue_ttm = Some(1_000.0);
        snapshot.quarterly_revenue = quarter_ends
            .iter()
            .map(|&date| Observation::new(date, 250.0))
            .collect();
        // Prices 2, 3, 4, 5, 6 on the five TTM dates (oldest TTM date is 2023-09-30)
        snapshot.quarterly_prices = [
            (d(2023, 9, 29), 2.0),
            (d(2023, 12, 29), 3.0),
            (d(2024, 3, 28), 4.0),
            (d(2024, 7, 1), 5.0),
            (d(2024, 9, 30), 6.0),
        ]
        .iter()
        .map(|&(date, value)| Observation::new(date, value))
        .collect();
        snapshot
    }

    #[test]
    fn test_analyze_with_history() {
        let engine = ValuationEngine::default();
        let record = engine
            .analyze_at(&rich_snapshot(), &growth(&[10.0, 20.0, 0.0]), stamp())
            .unwrap();

        assert_eq!(record.ticker, "ACME");
        assert_eq!(record.name, "Acme Corp");
        assert_eq!(record.currency, "SEK");
        assert_relative_eq!(record.projected_revenue, 1_320.0, epsilon = 1e-9);
        // Market caps 2k..6k over 1k revenue -> P/S 2..6, mean 4
        assert_eq!(record.ps_samples, 5);
        assert!(!record.ps_fallback);
        assert_relative_eq!(record.ps_average, 4.0);
        // 1_320 / 1_000 shares * 4
        assert_relative_eq!(record.target_price, 5.28, epsilon = 1e-9);
        assert_relative_eq!(record.undervaluation_percent.unwrap(), 164.0, epsilon = 1e-9);
        assert!(!record.low_confidence);
        assert_eq!(record.last_updated, stamp());
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let engine = ValuationEngine::default();
        let snapshot = rich_snapshot();
        let rates = growth(&[12.0, 8.5, -3.0]);
        let a = engine.analyze(&snapshot, &rates).unwrap();
        let b = engine.analyze(&snapshot, &rates).unwrap();
        assert_eq!(a.target_price.to_bits(), b.target_price.to_bits());
        assert_eq!(a.ps_average.to_bits(), b.ps_average.to_bits());
        assert_eq!(a.projected_revenue.to_bits(), b.projected_revenue.to_bits());
    }

    #[test]
    fn test_fallback_on_short_history() {
        let mut snapshot = rich_snapshot();
        snapshot.quarterly_revenue.truncate(3);
        let record = ValuationEngine::default()
            .analyze_at(&snapshot, &growth(&[]), stamp())
            .unwrap();
        assert!(record.ps_fallback);
        assert_eq!(record.ps_samples, 0);
        assert_relative_eq!(record.ps_average, 5.0);
        // Empty schedule leaves revenue unchanged
        assert_eq!(record.projected_revenue, record.revenue_ttm);
        assert_relative_eq!(record.target_price, 5.0);
    }

    #[test]
    fn test_zero_shares_is_insufficient() {
        let mut snapshot = rich_snapshot();
        snapshot.shares_outstanding = Some(0.0);
        let result = ValuationEngine::default().analyze(&snapshot, &growth(&[10.0]));
        assert!(matches!(result, Err(VentasError::InsufficientData(_))));

        snapshot.shares_outstanding = None;
        let result = ValuationEngine::default().analyze(&snapshot, &growth(&[10.0]));
        assert!(matches!(result, Err(VentasError::InsufficientData(_))));
    }

    #[test]
    fn test_negative_revenue_is_insufficient() {
        let mut snapshot = rich_snapshot();
        snapshot.revenue_ttm = Some(-1.0);
        let result = ValuationEngine::default().analyze(&snapshot, &growth(&[10.0]));
        assert!(matches!(result, Err(VentasError::InsufficientData(_))));
    }

    #[test]
    fn test_missing_revenue_derived_from_quarters() {
        let mut snapshot = rich_snapshot();
        snapshot.revenue_ttm = None;
        let record = ValuationEngine::default()
            .analyze_at(&snapshot, &growth(&[]), stamp())
            .unwrap();
        assert_relative_eq!(record.revenue_ttm, 1_000.0);
        assert!(!record.low_confidence);
    }

    #[test]
    fn test_missing_revenue_is_low_confidence() {
        let mut snapshot = FundamentalsSnapshot::new("thin");
        snapshot.shares_outstanding = Some(50.0);
        snapshot.revenue_ttm = Some(0.0);
        snapshot.current_price = Some(10.0);
        let record = ValuationEngine::default()
            .analyze_at(&snapshot, &growth(&[25.0]), stamp())
            .unwrap();
        assert!(record.low_confidence);
        assert!(record.ps_fallback);
        assert_eq!(record.projected_revenue, 0.0);
        assert_eq!(record.target_price, 0.0);
        assert_relative_eq!(record.undervaluation_percent.unwrap(), -100.0);
        assert_eq!(record.name, "THIN");
        assert_eq!(record.currency, "USD");
    }

    #[test]
    fn test_reported_zero_revenue_not_replaced() {
        let mut snapshot = rich_snapshot();
        snapshot.revenue_ttm = Some(0.0);
        snapshot.shares_outstanding = Some(100.0);
        let record = ValuationEngine::default()
            .analyze_at(&snapshot, &growth(&[10.0]), stamp())
            .unwrap();
        assert_eq!(record.revenue_ttm, 0.0);
        assert_eq!(record.projected_revenue, 0.0);
        assert_eq!(record.target_price, 0.0);
        assert!(record.low_confidence);
    }

    #[test]
    fn test_negative_price_dropped() {
        let mut snapshot = rich_snapshot();
        snapshot.current_price = Some(-5.0);
        let record = ValuationEngine::default()
            .analyze(&snapshot, &growth(&[10.0]))
            .unwrap();
        assert_eq!(record.current_price, None);
        assert_eq!(record.undervaluation_percent, None);
    }

    #[test]
    fn test_wide_price_window_does_not_panic() {
        // Validation caps the window, so an absurd value never reaches analysis.
        let config = ValuationConfig {
            price_window_days: i64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            ValuationEngine::new(config),
            Err(VentasError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_undervaluation_absent_without_price() {
        let mut snapshot = rich_snapshot();
        snapshot.current_price = None;
        let record = ValuationEngine::default()
            .analyze(&snapshot, &growth(&[10.0]))
            .unwrap();
        assert_eq!(record.current_price, None);
        assert_eq!(record.undervaluation_percent, None);

        snapshot.current_price = Some(0.0);
        let record = ValuationEngine::default()
            .analyze(&snapshot, &growth(&[10.0]))
            .unwrap();
        assert_eq!(record.current_price, Some(0.0));
        assert_eq!(record.undervaluation_percent, None);
    }

    #[test]
    fn test_growth_schedule_validation() {
        let engine = ValuationEngine::default();
        let snapshot = rich_snapshot();
        assert!(matches!(
            engine.analyze(&snapshot, &growth(&[1.0, 2.0, 3.0, 4.0])),
            Err(VentasError::InvalidInput(_))
        ));
        assert!(matches!(
            engine.analyze(&snapshot, &growth(&[f64::NAN])),
            Err(VentasError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = ValuationConfig {
            fallback_multiple: 0.0,
            ..Default::default()
        };
        assert!(ValuationEngine::new(config).is_err());
    }

    #[test]
    fn test_custom_fallback_multiple() {
        let engine = ValuationEngine::new(ValuationConfig {
            fallback_multiple: 2.5,
            ..Default::default()
        })
        .unwrap();
        let mut snapshot = rich_snapshot();
        snapshot.quarterly_prices.clear();
        let record = engine.analyze(&snapshot, &growth(&[])).unwrap();
        assert!(record.ps_fallback);
        assert_relative_eq!(record.ps_average, 2.5);
        assert_relative_eq!(record.target_price, 2.5);
    }
}
