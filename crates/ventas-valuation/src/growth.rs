//! Growth schedules derived from analyst revenue estimates.
//!
//! The engine never sources growth itself; this is a helper for callers that
//! want consensus-based rates instead of typing them in.

use ventas_traits::{Date, GrowthAssumptions, Observation};

/// Rate assumed for a forecast year without a usable estimate.
pub const DEFAULT_ESTIMATE_GROWTH: f64 = 20.0;

/// Year-over-year growth implied by consensus revenue estimates.
///
/// Considers estimates dated after `as_of`, oldest first. Year one compares
/// the first estimate to `revenue_ttm`; each later year compares to the
/// previous estimate. A year whose estimate (or base) is missing or not
/// positive uses `fallback` and carries the base forward at that rate.
#[must_use]
pub fn growth_from_estimates(
    revenue_ttm: f64,
    estimates: &[Observation],
    as_of: Date,
    years: usize,
    fallback: f64,
) -> GrowthAssumptions {
    let mut upcoming: Vec<&Observation> = estimates.iter().filter(|e| e.date > as_of).collect();
    upcoming.sort_by_key(|e| e.date);

    let mut base = (revenue_ttm.is_finite() && revenue_ttm > 0.0).then_some(revenue_ttm);
    let mut rates = Vec::with_capacity(years);

    for year in 0..years {
        let estimate = upcoming
            .get(year)
            .map(|e| e.value)
            .filter(|v| v.is_finite() && *v > 0.0);

        let rate = match (base, estimate) {
            (Some(b), Some(e)) => (e - b) / b * 100.0,
            _ => fallback,
        };
        rates.push(rate);

        base = estimate.or_else(|| base.map(|b| b * (1.0 + fallback / 100.0)));
    }

    GrowthAssumptions::new(rates)
}

/// Overlay manually entered rates on a derived schedule, year by year.
///
/// `None` entries keep the derived rate; extra manual years extend it. A
/// `None` past the end of `derived` becomes [`DEFAULT_ESTIMATE_GROWTH`] so
/// later entries keep their year.
#[must_use]
pub fn with_overrides(derived: &GrowthAssumptions, manual: &[Option<f64>]) -> GrowthAssumptions {
    let len = derived.len().max(manual.len());
    let rates = (0..len)
        .map(|i| {
            manual
                .get(i)
                .copied()
                .flatten()
                .or_else(|| derived.rates().get(i).copied())
                .unwrap_or(DEFAULT_ESTIMATE_GROWTH)
        })
        .collect();
    GrowthAssumptions::new(rates)
}
