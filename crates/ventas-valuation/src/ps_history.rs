//! Historical price-to-sales averaging.
//!
//! Builds rolling four-quarter revenue sums, matches each one to a price
//! observed near its quarter end, and averages the resulting P/S multiples.
//! Alignment is inherently noisy (reporting lag, missing quarters), so a
//! sample is skipped rather than zero-filled whenever a piece is missing.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ventas_traits::{Date, Observation};

/// Number of quarters summed into one trailing-twelve-month figure.
const QUARTERS_PER_YEAR: usize = 4;

/// Outcome of historical P/S averaging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsAverage {
    /// The multiple to apply. Always positive and finite.
    pub value: f64,
    /// Number of samples averaged. Zero when `fallback` is set.
    pub samples: usize,
    /// Whether `value` is the configured fallback rather than a computed mean.
    pub fallback: bool,
}

impl PsAverage {
    /// A fallback result carrying `multiple`.
    #[must_use]
    pub const fn fallback(multiple: f64) -> Self {
        Self {
            value: multiple,
            samples: 0,
            fallback: true,
        }
    }
}

/// Return `series` sorted oldest first, keeping the first observation of any
/// duplicated date.
#[must_use]
pub fn chronological(series: &[Observation]) -> Vec<Observation> {
    let mut sorted = series.to_vec();
    // Stable sort keeps input order among equal dates, so dedup keeps the first.
    sorted.sort_by_key(|o| o.date);
    sorted.dedup_by_key(|o| o.date);
    sorted
}

/// Rolling trailing-twelve-month revenue, oldest first.
///
/// Each point is dated at the last quarter of its window. Fewer than four
/// quarters produce no points; `n` quarters produce `n - 3`.
#[must_use]
pub fn rolling_ttm(quarterly_revenue: &[Observation]) -> Vec<Observation> {
    chronological(quarterly_revenue)
        .windows(QUARTERS_PER_YEAR)
        .map(|window| {
            let total = window.iter().map(|q| q.value).sum();
            Observation::new(window[QUARTERS_PER_YEAR - 1].date, total)
        })
        .collect()
}

/// Find the price observed closest to `date`, within `window_days` either side.
///
/// Ties on distance resolve to the earlier observation. Non-positive or
/// non-finite prices are ignored. A window chrono cannot represent matches
/// nothing.
#[must_use]
pub fn align_price(prices: &[Observation], date: Date, window_days: i64) -> Option<f64> {
    let window = Duration::try_days(window_days)?;
    prices
        .iter()
        .filter(|p| p.value.is_finite() && p.value > 0.0)
        .filter_map(|p| {
            let distance = (p.date - date).abs();
            (distance <= window).then_some((distance, p.date, p.value))
        })
        .min_by_key(|&(distance, day, _)| (distance, day))
        .map(|(_, _, price)| price)
}

/// Average P/S over the trailing quarterly history.
///
/// For every rolling TTM revenue point with positive revenue and a price
/// inside the alignment window, computes `price * shares / ttm_revenue`.
/// Returns the arithmetic mean of those samples, or
/// [`PsAverage::fallback`] when none exist.
#[must_use]
pub fn historical_ps(
    quarterly_revenue: &[Observation],
    prices: &[Observation],
    shares_outstanding: f64,
    window_days: i64,
    fallback_multiple: f64,
) -> PsAverage {
    let mut samples = Vec::new();

    for ttm in rolling_ttm(quarterly_revenue) {
        if !ttm.value.is_finite() || ttm.value <= 0.0 {
            debug!(date = %ttm.date, revenue = ttm.value, "Skipping non-positive TTM revenue");
            continue;
        }

        let Some(price) = align_price(prices, ttm.date, window_days) else {
            debug!(date = %ttm.date, window_days, "No price near quarter end");
            continue;
        };

        let market_cap = price * shares_outstanding;
        let ps = market_cap / ttm.value;
        if ps.is_finite() && ps > 0.0 {
            samples.push(ps);
        }
    }

    if samples.is_empty() {
        return PsAverage::fallback(fallback_multiple);
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    if !mean.is_finite() {
        return PsAverage::fallback(fallback_multiple);
    }

    PsAverage {
        value: mean,
        samples: samples.len(),
        fallback: false,
    }
}
