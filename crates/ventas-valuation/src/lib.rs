//! Price-to-sales valuation engine for ventas.
//!
//! Given a [`FundamentalsSnapshot`](ventas_traits::FundamentalsSnapshot) and a
//! growth schedule, the engine projects revenue forward, applies the
//! company's own historical P/S multiple and derives a per-share target price
//! together with an undervaluation signal. Everything here is pure
//! computation: no I/O, no clock reads outside the record timestamp.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ventas_traits::{FundamentalsSnapshot, GrowthAssumptions};
//! use ventas_valuation::{ValuationEngine, rank};
//!
//! let engine = ValuationEngine::default();
//!
//! let mut snapshot = FundamentalsSnapshot::new("ACME");
//! snapshot.shares_outstanding = Some(1_000_000.0);
//! snapshot.revenue_ttm = Some(50_000_000.0);
//! snapshot.current_price = Some(180.0);
//!
//! let record = engine
//!     .analyze(&snapshot, &GrowthAssumptions::new(vec![15.0, 12.0, 10.0]))
//!     .unwrap();
//! let ranked = rank(vec![record]);
//! ```

mod config;
mod engine;
mod growth;
mod ps_history;
mod projection;
mod rank;
mod target;

// Re-export main types
pub use config::{FALLBACK_PS_MULTIPLE, MAX_PRICE_WINDOW_DAYS, ValuationConfig};
pub use engine::ValuationEngine;
pub use growth::{DEFAULT_ESTIMATE_GROWTH, growth_from_estimates, with_overrides};
pub use projection::project_revenue;
pub use ps_history::{PsAverage, align_price, chronological, historical_ps, rolling_ttm};
pub use rank::rank;
pub use target::{round_percent, target_price, undervaluation_percent};
