//! Financial Modeling Prep (FMP) fundamentals provider for ventas.
//!
//! This crate provides a client for the [Financial Modeling Prep](https://financialmodelingprep.com/)
//! API and a [`FundamentalsProvider`](ventas_traits::FundamentalsProvider)
//! built on it that assembles everything the valuation engine needs for one
//! ticker: quote, profile, share count, quarterly revenue and daily prices.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ventas_fmp::FmpProvider;
//! use ventas_traits::FundamentalsProvider;
//!
//! let provider = FmpProvider::from_env()?.with_quarters(12);
//! let snapshot = provider.fetch_snapshot("MSFT").await?;
//! let estimates = provider.revenue_estimates("MSFT").await?;
//! ```
//!
//! The API key is read from `FMP_API_KEY`; a `.env` file in the working
//! directory is loaded first if present.

mod client;
mod error;
mod provider;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use provider::FmpProvider;
pub use types::*;

/// Result alias for FMP calls.
pub type Result<T> = std::result::Result<T, FmpError>;
