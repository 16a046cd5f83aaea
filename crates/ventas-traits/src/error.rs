//! Error types for the ventas toolkit.
//!
//! The taxonomy separates "the provider could not give us anything"
//! ([`VentasError::DataUnavailable`]) from "we got data but it cannot support a
//! valuation" ([`VentasError::InsufficientData`]). Batch operations catch both
//! per ticker; interactive callers see them directly.

use thiserror::Error;

/// The main error type for ventas operations.
#[derive(Debug, Error)]
pub enum VentasError {
    /// Fundamentals could not be fetched: unknown ticker or unreachable provider.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Fetched data lacks the fields needed to compute a target price.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Caller-supplied input was rejected (e.g. too many growth years).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record store could not complete the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O failure underneath a store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure underneath a store.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl VentasError {
    /// Returns `true` for errors that only affect a single ticker and should
    /// not abort a batch sweep.
    #[must_use]
    pub const fn is_per_ticker(&self) -> bool {
        matches!(
            self,
            Self::DataUnavailable(_) | Self::InsufficientData(_) | Self::InvalidInput(_)
        )
    }
}

impl From<String> for VentasError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for VentasError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for ventas operations.
pub type Result<T> = std::result::Result<T, VentasError>;
