//! Ranking of valuation records for display.

use std::cmp::Ordering;
use ventas_traits::ValuationRecord;

/// Order records by undervaluation, most undervalued first.
///
/// Records without an undervaluation figure go last. The sort is stable, so
/// ties and the unvalued tail keep their input order. This is a view
/// transform; nothing about the order is stored.
#[must_use]
pub fn rank(mut records: Vec<ValuationRecord>) -> Vec<ValuationRecord> {
    records.sort_by(|a, b| compare(a.undervaluation_percent, b.undervaluation_percent));
    records
}

fn compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(ticker: &str, undervaluation: Option<f64>) -> ValuationRecord {
        ValuationRecord {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            currency: "USD".to_string(),
            revenue_ttm: 100.0,
            growth_rates: vec![10.0],
            projected_revenue: 110.0,
            ps_average: 5.0,
            ps_samples: 0,
            ps_fallback: true,
            low_confidence: false,
            target_price: 55.0,
            current_price: undervaluation.map(|_| 50.0),
            undervaluation_percent: undervaluation,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_rank_descending_with_missing_last() {
        let records = vec![
            record("A", None),
            record("B", Some(10.0)),
            record("C", None),
            record("D", Some(30.0)),
        ];
        let ranked = rank(records);
        let tickers: Vec<&str> = ranked.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["D", "B", "A", "C"]);
        assert_eq!(ranked[0].undervaluation_percent, Some(30.0));
        assert_eq!(ranked[1].undervaluation_percent, Some(10.0));
        assert_eq!(ranked[2].undervaluation_percent, None);
        assert_eq!(ranked[3].undervaluation_percent, None);
    }

    #[test]
    fn test_rank_negative_values_and_ties() {
        let records = vec![
            record("X", Some(-5.0)),
            record("Y", Some(12.0)),
            record("Z", Some(12.0)),
        ];
        let ranked = rank(records);
        let tickers: Vec<&str> = ranked.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["Y", "Z", "X"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
