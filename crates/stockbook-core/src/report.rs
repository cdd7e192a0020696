//! # Reports
//!
//! Read-only projections over the registry and the ledger. Renderers
//! (console text, JSON, ...) consume these structures; nothing here knows
//! about an output medium, and nothing here mutates state.
//!
//! ```text
//! ProductRegistry ──┬──► stock_report(as_of)    rows + total units + warnings
//!                   └──► full_listing(as_of)    every field, insertion order
//! SalesLedger ──────────► profit_report(as_of)  NoSales | rows + total profit
//! ```
//!
//! The report date is always supplied by the caller.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::SalesLedger;
use crate::money::Money;
use crate::registry::ProductRegistry;
use crate::types::{Product, TaxRate};

// =============================================================================
// Stock Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    pub name: String,
    pub code: String,
    pub available_units: i64,
    pub minimum_threshold: i64,
}

/// Why a product needs restocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No units left. Takes precedence over `BelowThreshold`.
    OutOfStock,
    /// Units at or below the minimum threshold.
    BelowThreshold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub name: String,
    pub kind: WarningKind,
}

impl Warning {
    /// The warning a product raises, if any.
    pub fn for_product(product: &Product) -> Option<Warning> {
        let kind = if product.is_out_of_stock() {
            WarningKind::OutOfStock
        } else if product.is_below_threshold() {
            WarningKind::BelowThreshold
        } else {
            return None;
        };

        Some(Warning {
            name: product.name().to_string(),
            kind,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub as_of: NaiveDate,
    pub rows: Vec<StockRow>,
    pub total_units: i64,
    pub warnings: Vec<Warning>,
}

/// Stock levels with restock warnings, in registry order.
pub fn stock_report(registry: &ProductRegistry, as_of: NaiveDate) -> StockReport {
    let rows = registry
        .iter()
        .map(|p| StockRow {
            name: p.name().to_string(),
            code: p.code().to_string(),
            available_units: p.available_units(),
            minimum_threshold: p.minimum_threshold(),
        })
        .collect();

    StockReport {
        as_of,
        rows,
        total_units: registry.total_units(),
        warnings: registry.iter().filter_map(Warning::for_product).collect(),
    }
}

// =============================================================================
// Profit Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitRow {
    pub name: String,
    pub total_profit: Money,
}

/// Profit per product, or an explicit "nothing sold yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfitReport {
    NoSales {
        #[serde(rename = "asOf")]
        as_of: NaiveDate,
    },
    Sales {
        #[serde(rename = "asOf")]
        as_of: NaiveDate,
        rows: Vec<ProfitRow>,
        #[serde(rename = "totalProfit")]
        total_profit: Money,
    },
}

impl ProfitReport {
    pub fn as_of(&self) -> NaiveDate {
        match self {
            ProfitReport::NoSales { as_of } | ProfitReport::Sales { as_of, .. } => *as_of,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ProfitReport::NoSales { .. })
    }
}

/// Profit per product in ledger order (highest first).
pub fn profit_report(ledger: &SalesLedger, as_of: NaiveDate) -> ProfitReport {
    if ledger.is_empty() {
        return ProfitReport::NoSales { as_of };
    }

    ProfitReport::Sales {
        as_of,
        rows: ledger
            .entries()
            .iter()
            .map(|s| ProfitRow {
                name: s.product_name().to_string(),
                total_profit: s.total_profit(),
            })
            .collect(),
        total_profit: ledger.total_profit(),
    }
}

// =============================================================================
// Full Listing
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    pub name: String,
    pub category: String,
    pub sale_price: Money,
    pub vat: TaxRate,
    pub code: String,
    pub available_units: i64,
    pub minimum_threshold: i64,
}

impl From<&Product> for ListingRow {
    fn from(p: &Product) -> Self {
        ListingRow {
            name: p.name().to_string(),
            category: p.category().to_string(),
            sale_price: p.sale_price(),
            vat: p.vat(),
            code: p.code().to_string(),
            available_units: p.available_units(),
            minimum_threshold: p.minimum_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullListing {
    pub as_of: NaiveDate,
    pub rows: Vec<ListingRow>,
}

/// Every product with every field, in registry order.
pub fn full_listing(registry: &ProductRegistry, as_of: NaiveDate) -> FullListing {
    FullListing {
        as_of,
        rows: registry.iter().map(ListingRow::from).collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
