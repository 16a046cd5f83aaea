//! Fundamentals provider trait.
//!
//! A [`FundamentalsProvider`] is the leaf collaborator that turns a ticker
//! into a [`FundamentalsSnapshot`]. Every fetch is a blocking point from the
//! engine's perspective; timeout and retry policy belong to the implementor.

use crate::{FundamentalsSnapshot, Observation, Result};
use async_trait::async_trait;

/// A source of per-ticker fundamentals.
///
/// Implementations should be thread-safe (`Send + Sync`) so a single provider
/// can be shared by a pipeline and its callers.
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use ventas_traits::{FundamentalsProvider, FundamentalsSnapshot, Result};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl FundamentalsProvider for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot> {
///         let mut snapshot = FundamentalsSnapshot::new(ticker);
///         snapshot.shares_outstanding = Some(1_000.0);
///         snapshot.revenue_ttm = Some(5_000.0);
///         Ok(snapshot)
///     }
/// }
/// ```
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Fetch the current fundamentals for `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`VentasError::DataUnavailable`](crate::VentasError::DataUnavailable)
    /// when the ticker is unknown or the provider cannot be reached.
    async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot>;

    /// Analyst consensus revenue estimates, one per fiscal year, dated at the
    /// fiscal year end.
    ///
    /// Providers without estimate coverage keep the default, which returns
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`VentasError::DataUnavailable`](crate::VentasError::DataUnavailable)
    /// when the provider cannot be reached.
    async fn revenue_estimates(&self, ticker: &str) -> Result<Vec<Observation>> {
        let _ = ticker;
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VentasError;

    struct Offline;

    #[async_trait]
    impl FundamentalsProvider for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot> {
            Err(VentasError::DataUnavailable(ticker.to_string()))
        }
    }

    #[tokio::test]
    async fn test_provider_as_trait_object() {
        let provider: Box<dyn FundamentalsProvider> = Box::new(Offline);
        assert_eq!(provider.name(), "offline");
        let err = provider.fetch_snapshot("ZZZZ").await.unwrap_err();
        assert!(matches!(err, VentasError::DataUnavailable(t) if t == "ZZZZ"));
        assert!(provider.revenue_estimates("ZZZZ").await.unwrap().is_empty());
    }
}
