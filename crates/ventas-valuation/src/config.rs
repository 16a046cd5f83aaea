//! Engine configuration.

use serde::{Deserialize, Serialize};
use ventas_traits::{Result, VentasError};

/// Multiple used when no historical P/S sample can be computed.
pub const FALLBACK_PS_MULTIPLE: f64 = 5.0;

/// Widest accepted price alignment window, in days either side.
pub const MAX_PRICE_WINDOW_DAYS: i64 = 366;

/// Configuration for the valuation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// P/S multiple applied when the history yields no valid sample (default: 5.0)
    pub fallback_multiple: f64,

    /// Calendar days either side of a quarter end in which a price may be matched (default: 3)
    pub price_window_days: i64,

    /// Maximum number of forecast years accepted in a growth schedule (default: 3)
    pub max_growth_years: usize,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            fallback_multiple: FALLBACK_PS_MULTIPLE,
            price_window_days: 3,
            max_growth_years: 3,
        }
    }
}

impl ValuationConfig {
    /// Check that the configuration can only produce finite, positive multiples.
    ///
    /// # Errors
    ///
    /// Returns [`VentasError::InvalidInput`] when a field is out of range.
    pub fn validate(&self) -> Result<()> {
        if !self.fallback_multiple.is_finite() || self.fallback_multiple <= 0.0 {
            return Err(VentasError::InvalidInput(format!(
                "fallback multiple must be positive and finite, got {}",
                self.fallback_multiple
            )));
        }
        if !(0..=MAX_PRICE_WINDOW_DAYS).contains(&self.price_window_days) {
            return Err(VentasError::InvalidInput(format!(
                "price window must be within 0..={MAX_PRICE_WINDOW_DAYS} days, got {}",
                self.price_window_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = ValuationConfig::default();
        assert_relative_eq!(config.fallback_multiple, 5.0);
        assert_eq!(config.price_window_days, 3);
        assert_eq!(config.max_growth_years, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_fallback() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ValuationConfig {
                fallback_multiple: bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(VentasError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_out_of_range_window() {
        for bad in [-1, MAX_PRICE_WINDOW_DAYS + 1, i64::MAX] {
            let config = ValuationConfig {
                price_window_days: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
        let widest = ValuationConfig {
            price_window_days: MAX_PRICE_WINDOW_DAYS,
            ..Default::default()
        };
        assert!(widest.validate().is_ok());
    }
}
