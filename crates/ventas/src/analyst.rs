//! The fetch → value → persist pipeline.

use chrono::Utc;
use tracing::{info, warn};
use ventas_traits::{
    FundamentalsProvider, GrowthAssumptions, RecordStore, Result, Ticker, ValuationRecord,
    VentasError, normalize_ticker,
};
use ventas_valuation::{
    DEFAULT_ESTIMATE_GROWTH, ValuationEngine, growth_from_estimates, with_overrides,
};

/// One ticker that failed during a batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// The ticker that failed.
    pub ticker: Ticker,
    /// Why it failed.
    pub error: VentasError,
}

/// Outcome of a batch analysis or a refresh-all sweep.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Tickers whose records were recomputed and stored, in processing order.
    pub refreshed: Vec<Ticker>,
    /// Tickers that were skipped, with the reason.
    pub failed: Vec<BatchFailure>,
}

impl RefreshReport {
    /// Number of tickers attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.refreshed.len() + self.failed.len()
    }

    /// Whether every ticker succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fold one ticker's outcome into the report, passing through errors
    /// that are not confined to that ticker.
    fn record(&mut self, ticker: &str, outcome: Result<ValuationRecord>) -> Result<()> {
        match outcome {
            Ok(record) => self.refreshed.push(record.ticker),
            Err(error) if error.is_per_ticker() => {
                warn!(%ticker, %error, "Skipping ticker");
                self.failed.push(BatchFailure {
                    ticker: normalize_ticker(ticker),
                    error,
                });
            }
            Err(error) => {
                warn!(%ticker, %error, "Aborting batch");
                return Err(error);
            }
        }
        Ok(())
    }

    fn finish(self) -> Self {
        info!(
            refreshed = self.refreshed.len(),
            failed = self.failed.len(),
            "Batch finished"
        );
        self
    }
}

/// Runs analyses end to end: fetch fundamentals, value them, upsert the record.
///
/// Owns its provider and store; the engine itself stays stateless. Work is
/// strictly sequential, one ticker at a time.
#[derive(Debug)]
pub struct Analyst<P, S> {
    provider: P,
    store: S,
    engine: ValuationEngine,
}

impl<P, S> Analyst<P, S>
where
    P: FundamentalsProvider,
    S: RecordStore,
{
    /// Create an analyst with the default engine configuration.
    pub fn new(provider: P, store: S) -> Self {
        Self::with_engine(provider, store, ValuationEngine::default())
    }

    /// Create an analyst with a custom engine.
    pub const fn with_engine(provider: P, store: S, engine: ValuationEngine) -> Self {
        Self {
            provider,
            store,
            engine,
        }
    }

    /// The record store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the record store (for deletes and bulk rewrites).
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The valuation engine.
    pub const fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Analyze one ticker with a caller-supplied growth schedule and store it.
    ///
    /// # Errors
    ///
    /// Surfaces `DataUnavailable` from the provider, `InsufficientData` or
    /// `InvalidInput` from the engine, and store failures, unchanged.
    pub async fn analyze(
        &mut self,
        ticker: &str,
        growth: &GrowthAssumptions,
    ) -> Result<ValuationRecord> {
        let ticker = normalize_ticker(ticker);
        let snapshot = self.provider.fetch_snapshot(&ticker).await?;
        let record = self.engine.analyze(&snapshot, growth)?;
        self.store.upsert(record.clone())?;
        info!(
            %ticker,
            provider = self.provider.name(),
            target = record.target_price,
            "Stored valuation"
        );
        Ok(record)
    }

    /// Analyze one ticker with growth derived from analyst revenue estimates.
    ///
    /// Each entry in `manual` that is `Some` overrides the derived rate for
    /// that year. Years without an estimate use
    /// [`DEFAULT_ESTIMATE_GROWTH`]. An estimate fetch failure is logged and
    /// treated as "no estimates".
    ///
    /// # Errors
    ///
    /// As for [`analyze`](Self::analyze).
    pub async fn analyze_with_estimates(
        &mut self,
        ticker: &str,
        manual: &[Option<f64>],
    ) -> Result<ValuationRecord> {
        let ticker = normalize_ticker(ticker);
        let snapshot = self.provider.fetch_snapshot(&ticker).await?;

        let estimates = self
            .provider
            .revenue_estimates(&ticker)
            .await
            .unwrap_or_else(|e| {
                warn!(%ticker, error = %e, "Revenue estimates unavailable; using default growth");
                Vec::new()
            });

        let years = self.engine.config().max_growth_years;
        let derived = growth_from_estimates(
            snapshot.revenue_ttm.unwrap_or(0.0),
            &estimates,
            Utc::now().date_naive(),
            years,
            DEFAULT_ESTIMATE_GROWTH,
        );
        let growth = with_overrides(&derived, manual);

        let record = self.engine.analyze(&snapshot, &growth)?;
        self.store.upsert(record.clone())?;
        info!(%ticker, growth = ?growth.rates(), "Stored estimate-based valuation");
        Ok(record)
    }

    /// Analyze several tickers in turn, isolating failures per ticker.
    ///
    /// Errors that only concern one ticker (see
    /// [`VentasError::is_per_ticker`]) are logged and reported, and the sweep
    /// moves on.
    ///
    /// # Errors
    ///
    /// Stops at the first error that is not per ticker, such as a store
    /// failure, and returns it.
    pub async fn analyze_batch(
        &mut self,
        requests: &[(Ticker, GrowthAssumptions)],
    ) -> Result<RefreshReport> {
        let mut report = RefreshReport::default();
        for (ticker, growth) in requests {
            let outcome = self.analyze(ticker, growth).await;
            report.record(ticker, outcome)?;
        }
        Ok(report.finish())
    }

    /// Like [`analyze_batch`](Self::analyze_batch), deriving each ticker's
    /// growth from analyst estimates with the same `manual` overrides.
    ///
    /// # Errors
    ///
    /// As for [`analyze_batch`](Self::analyze_batch).
    pub async fn analyze_batch_with_estimates(
        &mut self,
        tickers: &[Ticker],
        manual: &[Option<f64>],
    ) -> Result<RefreshReport> {
        let mut report = RefreshReport::default();
        for ticker in tickers {
            let outcome = self.analyze_with_estimates(ticker, manual).await;
            report.record(ticker, outcome)?;
        }
        Ok(report.finish())
    }

    /// Re-run every stored ticker with the growth rates it was stored with.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, or as for
    /// [`analyze_batch`](Self::analyze_batch).
    pub async fn refresh_all(&mut self) -> Result<RefreshReport> {
        let requests: Vec<(Ticker, GrowthAssumptions)> = self
            .store
            .load_all()?
            .into_iter()
            .map(|r| {
                let growth = r.growth();
                (r.ticker, growth)
            })
            .collect();

        info!(tickers = requests.len(), "Refreshing all records");
        self.analyze_batch(&requests).await
    }
}
