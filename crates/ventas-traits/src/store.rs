//! Record store trait.
//!
//! The store is the sole owner of [`ValuationRecord`] lifetime. Records are
//! keyed by ticker: writing a ticker that already exists replaces it.

use crate::{Result, ValuationRecord, normalize_ticker};

/// Persistence contract over a set of valuation records.
///
/// Each mutating call must be atomic from the caller's perspective: either
/// the whole change is visible afterwards or none of it is. Implementations
/// are used from a single thread; a multi-client front-end must serialize
/// access itself.
pub trait RecordStore {
    /// Load every stored record. Order is unspecified; callers rank.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load_all(&self) -> Result<Vec<ValuationRecord>>;

    /// Insert `record`, replacing any record with the same ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn upsert(&mut self, record: ValuationRecord) -> Result<()>;

    /// Remove the record for `ticker`.
    ///
    /// Returns whether a record was removed; a missing ticker is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn delete(&mut self, ticker: &str) -> Result<bool>;

    /// Clear the store and write `records` in their place.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn replace_all(&mut self, records: Vec<ValuationRecord>) -> Result<()>;

    /// Look up a single record by ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, ticker: &str) -> Result<Option<ValuationRecord>> {
        let key = normalize_ticker(ticker);
        Ok(self.load_all()?.into_iter().find(|r| r.ticker == key))
    }
}
