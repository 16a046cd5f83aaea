//! FMP client errors.

use thiserror::Error;
use ventas_traits::VentasError;

/// Failures talking to FMP.
///
/// Only the provider boundary converts these into [`VentasError`].
#[derive(Debug, Error)]
pub enum FmpError {
    /// `FMP_API_KEY` is unset or blank.
    #[error("FMP_API_KEY is not set")]
    MissingApiKey,

    /// Transport failure or timeout.
    #[error("FMP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body did not match the expected shape.
    #[error("unexpected FMP response: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status or an error object in the body.
    #[error("FMP API error: {0}")]
    Api(String),

    /// HTTP 429.
    #[error("FMP rate limit exceeded")]
    RateLimitExceeded,

    /// Quote or profile lookup returned nothing.
    #[error("unknown symbol {0}")]
    SymbolNotFound(String),

    /// Endpoint returned an empty result.
    #[error("no FMP data for {0}")]
    NoData(String),
}

// Every provider-side failure looks the same to the valuation pipeline.
impl From<FmpError> for VentasError {
    fn from(err: FmpError) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}
