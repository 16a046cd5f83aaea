#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ventas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type and trait definitions for the ventas valuation toolkit.
//!
//! This crate holds the data model shared by every other ventas crate: the
//! fundamentals snapshot fed into the valuation engine, the growth schedule,
//! the persisted valuation record, the error taxonomy, and the two
//! collaborator seams ([`FundamentalsProvider`] and [`RecordStore`]).

/// The version of the ventas-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod provider;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, VentasError};
pub use provider::FundamentalsProvider;
pub use store::RecordStore;
pub use types::{
    Date, FundamentalsSnapshot, GrowthAssumptions, Observation, Ticker, ValuationRecord,
    normalize_ticker,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
