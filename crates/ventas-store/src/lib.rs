//! Record stores for ventas.
//!
//! Two [`RecordStore`](ventas_traits::RecordStore) implementations:
//!
//! - [`MemoryStore`] keeps records in a `Vec`, for tests and one-shot runs
//! - [`JsonFileStore`] keeps them in a single JSON document on disk, rewritten
//!   atomically (write to a sibling temp file, then rename) on every change
//!
//! Both key records by ticker, so writing a ticker twice leaves one record.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use ventas_traits::{ValuationRecord, normalize_ticker};

/// Replace the record with the same ticker in place, or append.
pub(crate) fn upsert_into(records: &mut Vec<ValuationRecord>, mut record: ValuationRecord) {
    record.ticker = normalize_ticker(&record.ticker);
    match records.iter_mut().find(|r| r.ticker == record.ticker) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

/// Remove the record for `ticker`, returning whether one was present.
pub(crate) fn remove_from(records: &mut Vec<ValuationRecord>, ticker: &str) -> bool {
    let key = normalize_ticker(ticker);
    let before = records.len();
    records.retain(|r| r.ticker != key);
    records.len() != before
}

/// Collapse duplicate tickers, last write wins, keeping first-seen order.
pub(crate) fn dedup_by_ticker(records: Vec<ValuationRecord>) -> Vec<ValuationRecord> {
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        upsert_into(&mut unique, record);
    }
    unique
}
