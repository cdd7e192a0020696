//! # Inventory
//!
//! Owns one [`ProductRegistry`] and one [`SalesLedger`] and runs the sell
//! workflow that ties them together.
//!
//! ## Sell Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell("widget", 3)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  registry.ensure_sellable ─────── Err ──┐                               │
//! │       │ Ok(&Product)                    │                               │
//! │       ▼                                 │                               │
//! │  amount = price × units × (100 + vat) / 100 ── overflow ──┤             │
//! │       │                                 │                 │             │
//! │       ▼                                 ▼                 ▼             │
//! │  ledger.projected_total ── overflow ──► return Err (nothing changed)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  registry.adjust_stock_for_sale + ledger.record_sale                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(SaleLine { name: "Widget", units: 3, amount: 33.00 })              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A batch is a list of independent sells: one failing item neither stops
//! the batch nor rolls back the items already sold.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::ledger::SalesLedger;
use crate::money::Money;
use crate::registry::ProductRegistry;
use crate::report::{self, FullListing, ProfitReport, StockReport};
use crate::types::{Product, ProductField};

/// One item of a sale: which product and how many units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    pub name: String,
    pub units: i64,
}

impl SaleRequest {
    pub fn new(name: impl Into<String>, units: i64) -> Self {
        SaleRequest {
            name: name.into(),
            units,
        }
    }
}

/// A successfully sold item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Registered name of the product (canonical casing).
    pub name: String,
    pub units: i64,
    /// VAT-inclusive amount recorded in the ledger.
    pub amount: Money,
}

/// Per-item outcome of a batch sale, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSale {
    pub outcomes: Vec<(SaleRequest, CoreResult<SaleLine>)>,
}

impl BatchSale {
    /// Total of the items that sold.
    pub fn total(&self) -> Money {
        self.sold().map(|line| line.amount).sum()
    }

    pub fn sold(&self) -> impl Iterator<Item = &SaleLine> {
        self.outcomes.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&SaleRequest, &CoreError)> {
        self.outcomes
            .iter()
            .filter_map(|(req, r)| r.as_ref().err().map(|e| (req, e)))
    }

    pub fn all_sold(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Registry + ledger owned together; no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    registry: ProductRegistry,
    ledger: SalesLedger,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    pub fn register<I>(&mut self, products: I) -> CoreResult<usize>
    where
        I: IntoIterator<Item = Product>,
    {
        self.registry.register(products)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.registry.remove(name)
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        self.registry.find(name)
    }

    pub fn restock(&mut self, name: &str, units: i64) -> CoreResult<&Product> {
        self.registry.restock(name, units)
    }

    pub fn update(&mut self, name: &str, field: ProductField) -> CoreResult<&Product> {
        self.registry.update(name, field)
    }

    /// Sells `units` of one product and records the sale amount.
    ///
    /// ```rust
    /// use stockbook_core::{Inventory, Money, Product, TaxRate};
    ///
    /// let mut inventory = Inventory::new();
    /// inventory.register([Product::new(
    ///     "Widget", "tools", Money::from_cents(1000),
    ///     TaxRate::from_bps(1000), "W-1", 5, 2,
    /// ).unwrap()]).unwrap();
    ///
    /// let line = inventory.sell("widget", 3).unwrap();
    /// assert_eq!(line.amount.cents(), 3300);
    /// assert_eq!(inventory.find("Widget").unwrap().available_units(), 2);
    /// assert!(inventory.sell("widget", 3).is_err());
    /// ```
    ///
    /// ## Errors
    /// Every check runs before stock is touched, so on error neither the
    /// registry nor the ledger has changed.
    pub fn sell(&mut self, name: &str, units: i64) -> CoreResult<SaleLine> {
        let product = self.registry.ensure_sellable(name, units)?;
        let amount = product.sale_amount(units)?;
        let name = product.name().to_string();
        self.ledger.projected_total(&name, amount)?;

        self.registry.adjust_stock_for_sale(&name, units)?;
        self.ledger.record_sale(&name, amount)?;

        Ok(SaleLine {
            name,
            units,
            amount,
        })
    }

    /// Sells each request independently, in order.
    pub fn sell_batch<I>(&mut self, requests: I) -> BatchSale
    where
        I: IntoIterator<Item = SaleRequest>,
    {
        let outcomes = requests
            .into_iter()
            .map(|req| {
                let result = self.sell(&req.name, req.units);
                (req, result)
            })
            .collect();

        BatchSale { outcomes }
    }

    pub fn stock_report(&self, as_of: NaiveDate) -> StockReport {
        report::stock_report(&self.registry, as_of)
    }

    pub fn profit_report(&self, as_of: NaiveDate) -> ProfitReport {
        report::profit_report(&self.ledger, as_of)
    }

    pub fn full_listing(&self, as_of: NaiveDate) -> FullListing {
        report::full_listing(&self.registry, as_of)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::WarningKind;
    use crate::types::TaxRate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()
    }

    fn widget() -> Product {
        Product::new(
            "Widget",
            "tools",
            Money::from_cents(1000),
            TaxRate::from_bps(1000),
            "W-1",
            5,
            2,
        )
        .unwrap()
    }

    fn gadget() -> Product {
        Product::new(
            "Gadget",
            "toys",
            Money::from_cents(250),
            TaxRate::zero(),
            "G-1",
            10,
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_widget_scenario() {
        let mut inventory = Inventory::new();
        inventory.register([widget()]).unwrap();

        let line = inventory.sell("Widget", 3).unwrap();
        assert_eq!(line.amount, Money::from_cents(3300));
        assert_eq!(inventory.find("Widget").unwrap().available_units(), 2);

        let report = inventory.stock_report(date());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, WarningKind::BelowThreshold);

        let err = inventory.sell("Widget", 3).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(inventory.find("Widget").unwrap().available_units(), 2);
        assert_eq!(inventory.ledger().len(), 1);
        assert_eq!(
            inventory.ledger().find("Widget").unwrap().total_profit(),
            Money::from_cents(3300)
        );
    }

    #[test]
    fn test_restock_negative_scenario() {
        let mut inventory = Inventory::new();
        inventory.register([widget()]).unwrap();

        let err = inventory.restock("Widget", -1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
        assert_eq!(inventory.find("Widget").unwrap().available_units(), 5);
    }

    #[test]
    fn test_empty_inventory_reports() {
        let inventory = Inventory::new();
        assert!(inventory.full_listing(date()).rows.is_empty());
        assert!(inventory.profit_report(date()).is_empty());
        assert_eq!(inventory.stock_report(date()).total_units, 0);
    }

    #[test]
    fn test_sell_records_canonical_name() {
        let mut inventory = Inventory::new();
        inventory.register([widget()]).unwrap();

        let line = inventory.sell("wIDGET", 1).unwrap();
        assert_eq!(line.name, "Widget");
        assert_eq!(inventory.ledger().entries()[0].product_name(), "Widget");
    }

    #[test]
    fn test_sale_outlives_product() {
        let mut inventory = Inventory::new();
        inventory.register([widget()]).unwrap();
        inventory.sell("Widget", 1).unwrap();

        assert!(inventory.remove("widget"));
        assert!(inventory.find("Widget").is_none());
        assert_eq!(inventory.ledger().len(), 1);
        assert!(!inventory.profit_report(date()).is_empty());
    }

    #[test]
    fn test_batch_partial_failure_keeps_successes() {
        let mut inventory = Inventory::new();
        inventory.register([widget(), gadget()]).unwrap();

        let batch = inventory.sell_batch([
            SaleRequest::new("Widget", 2),
            SaleRequest::new("Sprocket", 1),
            SaleRequest::new("Widget", 9),
            SaleRequest::new("Gadget", 4),
        ]);

        assert!(!batch.all_sold());
        assert_eq!(batch.sold().count(), 2);
        let failures: Vec<_> = batch.failures().map(|(req, _)| req.name.as_str()).collect();
        assert_eq!(failures, ["Sprocket", "Widget"]);

        // 10.00 * 2 * 1.10 + 2.50 * 4 = 22.00 + 10.00
        assert_eq!(batch.total(), Money::from_cents(3200));
        assert_eq!(inventory.find("Widget").unwrap().available_units(), 3);
        assert_eq!(inventory.find("Gadget").unwrap().available_units(), 6);
        assert_eq!(inventory.ledger().total_profit(), Money::from_cents(3200));
    }

    #[test]
    fn test_invalid_units_do_not_touch_ledger() {
        let mut inventory = Inventory::new();
        inventory.register([widget()]).unwrap();

        assert!(matches!(
            inventory.sell("Widget", 0),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            inventory.sell("Nope", 1),
            Err(CoreError::NotFound(_))
        ));
        assert!(inventory.ledger().is_empty());
    }

    #[test]
    fn test_update_then_sell_uses_new_price() {
        let mut inventory = Inventory::new();
        inventory.register([widget()]).unwrap();
        inventory
            .update("Widget", ProductField::Price(Money::from_cents(2000)))
            .unwrap();
        inventory
            .update("Widget", ProductField::Vat(TaxRate::zero()))
            .unwrap();

        let line = inventory.sell("Widget", 2).unwrap();
        assert_eq!(line.amount, Money::from_cents(4000));
    }

    fn priced(name: &str, cents: i64, units: i64) -> Product {
        Product::new(name, "c", Money::from_cents(cents), TaxRate::zero(), "x", units, 0).unwrap()
    }

    #[test]
    fn test_amount_overflow_leaves_stock_and_ledger() {
        let mut inventory = Inventory::new();
        inventory
            .register([priced("W", 5_000_000_000_000_000, 2000)])
            .unwrap();

        let err = inventory.sell("W", 2000).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
        assert_eq!(inventory.find("W").unwrap().available_units(), 2000);
        assert!(inventory.ledger().is_empty());

        // A sale that fits still goes through afterwards
        let line = inventory.sell("W", 1).unwrap();
        assert_eq!(line.amount, Money::from_cents(5_000_000_000_000_000));
    }

    #[test]
    fn test_profit_overflow_leaves_stock_and_ledger() {
        let mut inventory = Inventory::new();
        inventory.register([priced("Big", i64::MAX / 2, 3)]).unwrap();

        inventory.sell("Big", 1).unwrap();
        inventory.sell("Big", 1).unwrap();
        let err = inventory.sell("Big", 1).unwrap_err();

        assert!(matches!(err, CoreError::InvalidArgument { .. }));
        assert_eq!(inventory.find("Big").unwrap().available_units(), 1);
        assert_eq!(
            inventory.ledger().find("Big").unwrap().total_profit().cents(),
            (i64::MAX / 2) * 2
        );
    }

    #[test]
    fn test_reports_never_overflow() {
        let mut inventory = Inventory::new();
        inventory
            .register([priced("A", i64::MAX, i64::MAX), priced("B", i64::MAX, i64::MAX)])
            .unwrap();
        inventory.sell("A", 1).unwrap();
        inventory.sell("B", 1).unwrap();

        let stock = inventory.stock_report(date());
        assert_eq!(stock.total_units, i64::MAX);

        match inventory.profit_report(date()) {
            ProfitReport::Sales { total_profit, .. } => {
                assert_eq!(total_profit, Money::from_cents(i64::MAX))
            }
            other => panic!("expected sales, got {:?}", other),
        }
    }

    #[test]
    fn test_sale_catching_up_to_tie_stays_behind() {
        let mut inventory = Inventory::new();
        inventory
            .register([priced("A", 100, 10), priced("B", 300, 10)])
            .unwrap();

        inventory.sell("A", 1).unwrap();
        inventory.sell("B", 1).unwrap();
        inventory.sell("a", 2).unwrap();

        let names: Vec<_> = inventory
            .ledger()
            .entries()
            .iter()
            .map(|s| s.product_name())
            .collect();
        assert_eq!(names, ["B", "A"]);
    }
}
