//! Target price and undervaluation.

use ventas_traits::{Result, VentasError};

/// Per-share fair value: projected revenue per share times the P/S multiple.
///
/// # Errors
///
/// Returns [`VentasError::InsufficientData`] when `shares_outstanding` is not
/// a positive finite number, and when the result would not be finite.
pub fn target_price(projected_revenue: f64, shares_outstanding: f64, ps_multiple: f64) -> Result<f64> {
    if !shares_outstanding.is_finite() || shares_outstanding <= 0.0 {
        return Err(VentasError::InsufficientData(format!(
            "shares outstanding must be positive, got {shares_outstanding}"
        )));
    }

    let target = (projected_revenue / shares_outstanding) * ps_multiple;
    if !target.is_finite() {
        return Err(VentasError::InsufficientData(format!(
            "target price is not finite (projected revenue {projected_revenue}, P/S {ps_multiple})"
        )));
    }
    Ok(target)
}

/// Percentage by which `target_price` exceeds `current_price`.
///
/// `None` when the price is absent, zero, negative or not finite.
#[must_use]
pub fn undervaluation_percent(target_price: f64, current_price: Option<f64>) -> Option<f64> {
    let price = current_price.filter(|p| p.is_finite() && *p > 0.0)?;
    let pct = (target_price - price) / price * 100.0;
    pct.is_finite().then_some(pct)
}

/// Round a percentage to two decimals for display (half away from zero).
#[must_use]
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
