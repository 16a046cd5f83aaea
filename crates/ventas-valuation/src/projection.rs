//! Multi-year revenue projection.

/// Project `revenue_ttm` forward through each percentage growth rate in turn.
///
/// An empty schedule returns the input unchanged. Rates are not clamped:
/// `-100.0` zeroes every later year.
#[must_use]
pub fn project_revenue(revenue_ttm: f64, rates: &[f64]) -> f64 {
    rates
        .iter()
        .fold(revenue_ttm, |projected, rate| projected * (1.0 + rate / 100.0))
}
