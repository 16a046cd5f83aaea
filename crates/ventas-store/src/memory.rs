//! In-memory record store.

use crate::{dedup_by_ticker, remove_from, upsert_into};
use ventas_traits::{RecordStore, Result, ValuationRecord};

/// Record store backed by a `Vec`, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ValuationRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<ValuationRecord>> for MemoryStore {
    fn from(records: Vec<ValuationRecord>) -> Self {
        Self {
            records: dedup_by_ticker(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<ValuationRecord>> {
        Ok(self.records.clone())
    }

    fn upsert(&mut self, record: ValuationRecord) -> Result<()> {
        upsert_into(&mut self.records, record);
        Ok(())
    }

    fn delete(&mut self, ticker: &str) -> Result<bool> {
        Ok(remove_from(&mut self.records, ticker))
    }

    fn replace_all(&mut self, records: Vec<ValuationRecord>) -> Result<()> {
        self.records = dedup_by_ticker(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::record;

    #[test]
    fn test_upsert_semantics() {
        let mut store = MemoryStore::new();
        store.upsert(record("AAPL", 100.0)).unwrap();
        store.upsert(record("AAPL", 175.0)).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].target_price, 175.0);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = MemoryStore::from(vec![record("AAPL", 100.0)]);
        assert!(!store.delete("TSLA").unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.delete("AAPL").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_all_and_get() {
        let mut store = MemoryStore::from(vec![record("AAPL", 100.0)]);
        store
            .replace_all(vec![record("MSFT", 300.0), record("NVDA", 900.0)])
            .unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get("AAPL").unwrap().is_none());
        assert_eq!(store.get("nvda").unwrap().unwrap().target_price, 900.0);
    }
}
