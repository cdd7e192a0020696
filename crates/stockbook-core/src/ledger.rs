//! # Sales Ledger
//!
//! Accumulated profit per product name, kept in profit-descending order.
//!
//! ## Ordering
//! After every recording the entries are stably re-sorted by `total_profit`
//! descending. An entry that catches up to a tie stays behind the entry
//! already ranked there; a new name starts at the end before sorting.
//!
//! ```text
//! record("Widget", 33.00)   [Widget 33.00]
//! record("Gadget", 50.00)   [Gadget 50.00, Widget 33.00]
//! record("widget", 17.00)   [Gadget 50.00, Widget 50.00]   ← tie: Gadget stays first
//! ```
//!
//! Entries are never removed; a Sale outlives its Product.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Sale;

/// Ordered set of sales with at most one entry per case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger::default()
    }

    /// The accumulated profit `product_name` would have after recording
    /// `amount`, without recording it.
    ///
    /// ## Errors
    /// `InvalidArgument` if the total would overflow.
    pub fn projected_total(&self, product_name: &str, amount: Money) -> CoreResult<Money> {
        match self.find(product_name) {
            Some(existing) => existing
                .total_profit()
                .checked_add(amount)
                .ok_or_else(|| CoreError::invalid("amount", "accumulated profit would overflow")),
            None => Ok(amount),
        }
    }

    /// Adds `amount` to the product's accumulated profit, creating the entry
    /// on first sale, then restores the descending order. Returns the new
    /// accumulated profit for that name.
    ///
    /// The amount is not validated; pricing is the caller's job. On error
    /// the ledger is unchanged.
    ///
    /// ```rust
    /// use stockbook_core::{Money, SalesLedger};
    ///
    /// let mut ledger = SalesLedger::new();
    /// ledger.record_sale("Widget", Money::from_cents(3300)).unwrap();
    /// ledger.record_sale("WIDGET", Money::from_cents(1100)).unwrap();
    ///
    /// assert_eq!(ledger.len(), 1);
    /// assert_eq!(ledger.entries()[0].total_profit().cents(), 4400);
    /// ```
    pub fn record_sale(&mut self, product_name: &str, amount: Money) -> CoreResult<Money> {
        let product_name = product_name.trim();
        let total = self.projected_total(product_name, amount)?;

        match self.sales.iter_mut().find(|s| s.is_for(product_name)) {
            Some(existing) => existing.set_total_profit(total),
            None => self.sales.push(Sale::new(product_name, total)),
        }

        // sort_by is stable
        self.sales
            .sort_by(|a, b| b.total_profit().cmp(&a.total_profit()));

        Ok(total)
    }

    pub fn find(&self, product_name: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.is_for(product_name))
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Read view, highest profit first.
    pub fn entries(&self) -> &[Sale] {
        &self.sales
    }

    /// Sum of every entry's profit, saturating at the `Money` range.
    pub fn total_profit(&self) -> Money {
        self.sales.iter().map(Sale::total_profit).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ledger: &SalesLedger) -> Vec<&str> {
        ledger.entries().iter().map(Sale::product_name).collect()
    }

    fn record(ledger: &mut SalesLedger, name: &str, cents: i64) {
        ledger.record_sale(name, Money::from_cents(cents)).unwrap();
    }

    #[test]
    fn test_record_sale_accumulates_by_name() {
        let mut ledger = SalesLedger::new();
        let total = ledger.record_sale("Widget", Money::from_cents(3300)).unwrap();
        assert_eq!(total.cents(), 3300);
        let total = ledger.record_sale("wIdGeT", Money::from_cents(700)).unwrap();
        assert_eq!(total.cents(), 4000);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].product_name(), "Widget");
    }

    #[test]
    fn test_entries_sorted_descending() {
        let mut ledger = SalesLedger::new();
        record(&mut ledger, "A", 100);
        record(&mut ledger, "B", 300);
        record(&mut ledger, "C", 200);
        assert_eq!(names(&ledger), ["B", "C", "A"]);

        record(&mut ledger, "a", 500);
        assert_eq!(names(&ledger), ["A", "B", "C"]);
    }

    #[test]
    fn test_update_into_tie_stays_behind() {
        let mut ledger = SalesLedger::new();
        record(&mut ledger, "A", 100);
        record(&mut ledger, "B", 300);
        record(&mut ledger, "A", 200);
        assert_eq!(names(&ledger), ["B", "A"]);

        record(&mut ledger, "Widget", 3300);
        record(&mut ledger, "Gadget", 5000);
        record(&mut ledger, "widget", 1700);
        assert_eq!(names(&ledger), ["Gadget", "Widget", "B", "A"]);
    }

    #[test]
    fn test_new_entry_tie_goes_last() {
        let mut ledger = SalesLedger::new();
        record(&mut ledger, "Widget", 5000);
        record(&mut ledger, "Gadget", 5000);
        record(&mut ledger, "Sprocket", 5000);
        assert_eq!(names(&ledger), ["Widget", "Gadget", "Sprocket"]);
    }

    #[test]
    fn test_zero_amount_creates_entry() {
        let mut ledger = SalesLedger::new();
        assert!(ledger.is_empty());
        record(&mut ledger, "Freebie", 0);
        assert!(!ledger.is_empty());
        assert!(ledger.find("FREEBIE").unwrap().total_profit().is_zero());
    }

    #[test]
    fn test_total_profit() {
        let mut ledger = SalesLedger::new();
        record(&mut ledger, "A", 3300);
        record(&mut ledger, "B", 1250);
        assert_eq!(ledger.total_profit().cents(), 4550);
    }

    #[test]
    fn test_accumulation_overflow_leaves_ledger_unchanged() {
        let mut ledger = SalesLedger::new();
        let half = i64::MAX / 2;
        record(&mut ledger, "Big", half);
        record(&mut ledger, "Small", 10);
        record(&mut ledger, "Big", half);

        let err = ledger
            .record_sale("big", Money::from_cents(half))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
        assert!(ledger.projected_total("Big", Money::from_cents(half)).is_err());

        assert_eq!(names(&ledger), ["Big", "Small"]);
        assert_eq!(ledger.find("Big").unwrap().total_profit().cents(), half * 2);
    }

    #[test]
    fn test_total_profit_saturates() {
        let mut ledger = SalesLedger::new();
        record(&mut ledger, "A", i64::MAX);
        record(&mut ledger, "B", i64::MAX);
        assert_eq!(ledger.total_profit(), Money::from_cents(i64::MAX));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ledger_matches_stable_sort_model(
                records in proptest::collection::vec(("[a-dA-D]", 0i64..5), 0..40)
            ) {
                let mut ledger = SalesLedger::new();
                // (lowercase key, first-seen spelling, total)
                let mut model: Vec<(String, String, i64)> = Vec::new();

                for (name, units) in &records {
                    let cents = units * 100;
                    ledger.record_sale(name, Money::from_cents(cents)).unwrap();

                    let key = name.to_lowercase();
                    match model.iter_mut().find(|(k, _, _)| *k == key) {
                        Some(entry) => entry.2 += cents,
                        None => model.push((key, name.clone(), cents)),
                    }
                    model.sort_by(|a, b| b.2.cmp(&a.2));

                    let expected: Vec<(&str, i64)> =
                        model.iter().map(|(_, n, t)| (n.as_str(), *t)).collect();
                    let actual: Vec<(&str, i64)> = ledger
                        .entries()
                        .iter()
                        .map(|s| (s.product_name(), s.total_profit().cents()))
                        .collect();
                    prop_assert_eq!(actual, expected);
                }

                let expected: i64 = records.iter().map(|(_, c)| c * 100).sum();
                prop_assert_eq!(ledger.total_profit().cents(), expected);
            }
        }
    }
}
