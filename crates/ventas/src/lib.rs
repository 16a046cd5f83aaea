#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ventas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ventas
//!
//! Target price estimation for equities from projected revenue and the
//! company's own historical price-to-sales multiple.
//!
//! ventas is an umbrella crate that re-exports the ventas sub-crates and adds
//! the two pieces that tie them together: the [`Analyst`] pipeline and the
//! [`Watchlist`] browsing state.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ventas::{Analyst, GrowthAssumptions, Watchlist};
//! use ventas::fmp::FmpProvider;
//! use ventas::store::JsonFileStore;
//!
//! # async fn run() -> ventas::Result<()> {
//! let provider = FmpProvider::from_env().expect("FMP_API_KEY");
//! let store = JsonFileStore::new("ventas.json");
//! let mut analyst = Analyst::new(provider, store);
//!
//! analyst
//!     .analyze("AAPL", &GrowthAssumptions::new(vec![8.0, 7.0, 6.0]))
//!     .await?;
//!
//! let watchlist = Watchlist::load(analyst.store(), 20)?;
//! for record in watchlist.page_records() {
//!     println!("{} {:?}", record.ticker, record.undervaluation_percent);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types, errors, [`FundamentalsProvider`] and [`RecordStore`]
//! - [`valuation`] - The pure valuation engine and ranking
//! - [`fmp`] - Financial Modeling Prep fundamentals provider
//! - [`store`] - In-memory and JSON file record stores
//!
//! ## Data Flow
//!
//! 1. A **provider** fetches a fundamentals snapshot for a ticker
//! 2. The **engine** turns snapshot plus growth schedule into a record
//! 3. The **store** upserts the record by ticker
//! 4. The **watchlist** reloads, ranks and pages through the records

/// Version information for the ventas crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod analyst;
mod watchlist;

pub use analyst::{Analyst, BatchFailure, RefreshReport};
pub use watchlist::Watchlist;

/// Core type and trait definitions.
pub mod traits {
    pub use ventas_traits::*;
}

/// Valuation engine, P/S history, projection and ranking.
pub mod valuation {
    pub use ventas_valuation::*;
}

/// Financial Modeling Prep provider.
pub mod fmp {
    pub use ventas_fmp::*;
}

/// Record store implementations.
pub mod store {
    pub use ventas_store::*;
}

// Re-export the everyday types at top level
pub use ventas_traits::{
    Date, FundamentalsProvider, FundamentalsSnapshot, GrowthAssumptions, Observation,
    RecordStore, Result, Ticker, ValuationRecord, VentasError,
};
pub use ventas_valuation::{ValuationConfig, ValuationEngine, rank};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION, traits::VERSION);
    }
}
