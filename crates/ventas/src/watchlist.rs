//! Ranked, paginated view over stored records.

use ventas_traits::{RecordStore, Result, ValuationRecord, normalize_ticker};
use ventas_valuation::rank;

/// Browsing state for the analyzed companies.
///
/// Holds the records in ranked order (most undervalued first) and a page
/// cursor. The caller owns it and reloads it from the store after every
/// change; the engine and the store never see it.
#[derive(Debug, Clone)]
pub struct Watchlist {
    records: Vec<ValuationRecord>,
    page_size: usize,
    page: usize,
}

impl Watchlist {
    /// Rank `records` and start on the first page.
    ///
    /// A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(records: Vec<ValuationRecord>, page_size: usize) -> Self {
        Self {
            records: rank(records),
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Load and rank everything in `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &impl RecordStore, page_size: usize) -> Result<Self> {
        Ok(Self::new(store.load_all()?, page_size))
    }

    /// Reload from `store`, re-ranking and keeping the cursor in range.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn reload(&mut self, store: &impl RecordStore) -> Result<()> {
        self.records = rank(store.load_all()?);
        self.page = self.page.min(self.last_page());
        Ok(())
    }

    /// All records, ranked.
    #[must_use]
    pub fn records(&self) -> &[ValuationRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, zero-based.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; an empty list still has one (empty) page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.records.len().div_ceil(self.page_size).max(1)
    }

    fn last_page(&self) -> usize {
        self.page_count() - 1
    }

    /// Records on the current page.
    #[must_use]
    pub fn page_records(&self) -> &[ValuationRecord] {
        let start = (self.page * self.page_size).min(self.records.len());
        let end = (start + self.page_size).min(self.records.len());
        &self.records[start..end]
    }

    /// Rank (1-based) of the first record on the current page.
    #[must_use]
    pub const fn first_rank(&self) -> usize {
        self.page * self.page_size + 1
    }

    /// Move to `page`, clamped to the last page.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.last_page());
    }

    /// Advance one page. Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.last_page() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` when already on the first page.
    pub const fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Position of `ticker` in the ranking, with its record.
    #[must_use]
    pub fn find(&self, ticker: &str) -> Option<(usize, &ValuationRecord)> {
        let key = normalize_ticker(ticker);
        self.records.iter().enumerate().find(|(_, r)| r.ticker == key)
    }

    /// Jump to the page containing `ticker`. Returns `false` if it is not listed.
    pub fn show(&mut self, ticker: &str) -> bool {
        let Some(index) = self.find(ticker).map(|(index, _)| index) else {
            return false;
        };
        self.page = index / self.page_size;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ventas_store::MemoryStore;

    fn record(ticker: &str, undervaluation: Option<f64>) -> ValuationRecord {
        ValuationRecord {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            currency: "USD".to_string(),
            revenue_ttm: 10.0,
            growth_rates: vec![],
            projected_revenue: 10.0,
            ps_average: 5.0,
            ps_samples: 0,
            ps_fallback: true,
            low_confidence: false,
            target_price: 5.0,
            current_price: None,
            undervaluation_percent: undervaluation,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn five() -> Vec<ValuationRecord> {
        vec![
            record("A", Some(1.0)),
            record("B", None),
            record("C", Some(50.0)),
            record("D", Some(-10.0)),
            record("E", Some(20.0)),
        ]
    }

    #[test]
    fn test_ranked_pages() {
        let mut list = Watchlist::new(five(), 2);
        assert_eq!(list.page_count(), 3);

        let tickers = |l: &Watchlist| -> Vec<String> {
            l.page_records().iter().map(|r| r.ticker.clone()).collect()
        };
        assert_eq!(tickers(&list), vec!["C", "E"]);
        assert!(list.next_page());
        assert_eq!(tickers(&list), vec!["A", "D"]);
        assert_eq!(list.first_rank(), 3);
        assert!(list.next_page());
        assert_eq!(tickers(&list), vec!["B"]);
        assert!(!list.next_page());
        assert!(list.prev_page());
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_empty_list() {
        let mut list = Watchlist::new(Vec::new(), 0);
        assert!(list.is_empty());
        assert_eq!(list.page_size(), 1);
        assert_eq!(list.page_count(), 1);
        assert!(list.page_records().is_empty());
        assert!(!list.next_page());
        assert!(!list.prev_page());
    }

    #[test]
    fn test_go_to_and_show() {
        let mut list = Watchlist::new(five(), 2);
        list.go_to(99);
        assert_eq!(list.page(), 2);

        assert!(list.show("e"));
        assert_eq!(list.page(), 0);
        assert!(list.show("D"));
        assert_eq!(list.page(), 1);
        assert!(!list.show("ZZZ"));
        assert_eq!(list.find("d").map(|(i, _)| i), Some(3));
    }

    #[test]
    fn test_reload_clamps_page() {
        let mut store = MemoryStore::from(five());
        let mut list = Watchlist::load(&store, 2).unwrap();
        list.go_to(2);

        store.replace_all(vec![record("X", Some(5.0))]).unwrap();
        list.reload(&store).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.page(), 0);
        assert_eq!(list.page_records()[0].ticker, "X");
    }
}
