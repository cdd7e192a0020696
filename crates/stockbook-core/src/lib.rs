//! # stockbook-core: Inventory & Sales Engine
//!
//! The domain engine of Stockbook: a product registry with case-insensitive
//! dedup, a sales ledger ranked by profit, and read-only reports. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/console (stockbook binary)                  │   │
//! │  │   parse line ──► lock state ──► call core ──► render text/JSON  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockbook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  types    │  │ registry  │  │  ledger   │  │  report   │  │   │
//! │  │   │ Product   │  │ register  │  │ record    │  │ stock     │  │   │
//! │  │   │ Sale      │  │ restock   │  │ rank by   │  │ profit    │  │   │
//! │  │   │ TaxRate   │  │ sell/adj. │  │ profit    │  │ listing   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                       inventory: sell workflow                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • NO GLOBAL STATE             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Sale, TaxRate, ProductField
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules
//! - [`registry`] - ProductRegistry
//! - [`ledger`] - SalesLedger
//! - [`report`] - Stock, profit and listing projections
//! - [`inventory`] - Registry + ledger with the sell workflow
//!
//! ## Concurrency
//! Everything here is plain `&mut self` and single-threaded. A caller that
//! shares an [`Inventory`] across threads wraps it in a mutex; each
//! `&mut` method call is then one atomic step.
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stockbook_core::{Inventory, Money, Product, ProfitReport, TaxRate};
//!
//! let mut inventory = Inventory::new();
//! let widget = Product::new(
//!     "Widget", "tools", Money::from_cents(1000),
//!     TaxRate::from_bps(1000), "W-1", 5, 2,
//! ).unwrap();
//! inventory.register([widget]).unwrap();
//!
//! inventory.sell("widget", 3).unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
//! match inventory.profit_report(today) {
//!     ProfitReport::Sales { total_profit, .. } => assert_eq!(total_profit.cents(), 3300),
//!     ProfitReport::NoSales { .. } => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod registry;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{BatchSale, Inventory, SaleLine, SaleRequest};
pub use ledger::SalesLedger;
pub use money::Money;
pub use registry::ProductRegistry;
pub use report::{
    FullListing, ListingRow, ProfitReport, ProfitRow, StockReport, StockRow, Warning, WarningKind,
};
pub use types::*;
