//! # Domain Types
//!
//! Value entities owned by the registry and the ledger.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │       Product        │        │         Sale         │              │
//! │  │  ──────────────────  │        │  ──────────────────  │              │
//! │  │  name  (identity)    │ ─ ─ ─► │  product_name        │              │
//! │  │  category, code      │ sells  │  total_profit        │              │
//! │  │  sale_price (Money)  │        └──────────────────────┘              │
//! │  │  vat (TaxRate)       │                                               │
//! │  │  available_units     │        ┌──────────────────────┐              │
//! │  │  minimum_threshold   │        │       TaxRate        │              │
//! │  └──────────────────────┘        │  bps (u32)           │              │
//! │                                  │  1000 = 10%          │              │
//! │                                  └──────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products and sales are identified by name, compared case-insensitively
//! (see [`names_match`]). A Sale keeps its name even after the Product is
//! renamed or removed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_name, validate_threshold, validate_units,
};

/// Case-insensitive name comparison used for every identity check.
///
/// ```rust
/// use stockbook_core::types::names_match;
///
/// assert!(names_match("Widget", "wIDGET"));
/// assert!(!names_match("Widget", "Widgets"));
/// ```
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

// =============================================================================
// Tax Rate
// =============================================================================

/// VAT rate in basis points (1 bps = 0.01%).
///
/// 1000 bps = 10%, 2150 bps = 21.5%. Unsigned, so never negative. There is
/// no upper bound; rates above 100% are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a rate from a whole percentage (10 → 10%).
    ///
    /// `None` above 42 949 672%, where the basis points no longer fit a `u32`.
    #[inline]
    pub const fn from_whole_percent(pct: u32) -> Option<Self> {
        match pct.checked_mul(100) {
            Some(bps) => Some(TaxRate(bps)),
            None => None,
        }
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Renders the percentage with two decimals ("10.00", "21.50").
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}.{:02}", self.0 / 100, self.0 % 100);
        f.pad(&text)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item and its stock state.
///
/// ## Invariants
/// - `name` is trimmed and non-empty
/// - `sale_price` > 0
/// - `available_units` >= 0 (only the registry changes it)
/// - `minimum_threshold` >= 0
///
/// Fields are private so a `&mut Product` handed out by the registry cannot
/// break these; renames and stock changes go through
/// [`ProductRegistry`](crate::registry::ProductRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    name: String,
    category: String,
    sale_price: Money,
    vat: TaxRate,
    code: String,
    available_units: i64,
    minimum_threshold: i64,
}

impl Product {
    /// Builds a validated product.
    ///
    /// Registration requires at least one unit; a zero-stock product only
    /// ever exists as the result of selling everything.
    ///
    /// ```rust
    /// use stockbook_core::{Money, Product, TaxRate};
    ///
    /// let widget = Product::new(
    ///     "Widget", "tools", Money::from_cents(1000),
    ///     TaxRate::from_bps(1000), "W-1", 5, 2,
    /// ).unwrap();
    /// assert_eq!(widget.available_units(), 5);
    ///
    /// assert!(Product::new("", "tools", Money::from_cents(1000),
    ///     TaxRate::zero(), "W-1", 5, 2).is_err());
    /// ```
    pub fn new(
        name: &str,
        category: &str,
        sale_price: Money,
        vat: TaxRate,
        code: &str,
        available_units: i64,
        minimum_threshold: i64,
    ) -> CoreResult<Self> {
        validate_product_name(name)?;
        validate_price(sale_price)?;
        validate_units(available_units)?;
        validate_threshold(minimum_threshold)?;

        Ok(Product {
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            sale_price,
            vat,
            code: code.trim().to_string(),
            available_units,
            minimum_threshold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sale_price(&self) -> Money {
        self.sale_price
    }

    pub fn vat(&self) -> TaxRate {
        self.vat
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn available_units(&self) -> i64 {
        self.available_units
    }

    pub fn minimum_threshold(&self) -> i64 {
        self.minimum_threshold
    }

    /// True when this product's name matches `name` case-insensitively.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.available_units == 0
    }

    /// At or below the restock threshold (zero stock included).
    pub fn is_below_threshold(&self) -> bool {
        self.available_units <= self.minimum_threshold
    }

    /// VAT-inclusive amount for selling `units` at the current price:
    /// `sale_price * units * (100 + vat) / 100`, rounded to the cent.
    ///
    /// ## Errors
    /// `InvalidArgument` if the amount does not fit in [`Money`].
    pub fn sale_amount(&self, units: i64) -> CoreResult<Money> {
        self.sale_price
            .checked_mul(units)
            .and_then(|line| line.with_tax(self.vat))
            .ok_or_else(|| CoreError::invalid("units", "sale amount would overflow"))
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.trim().to_string();
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.trim().to_string();
    }

    pub fn set_sale_price(&mut self, price: Money) -> CoreResult<()> {
        validate_price(price)?;
        self.sale_price = price;
        Ok(())
    }

    pub fn set_vat(&mut self, vat: TaxRate) {
        self.vat = vat;
    }

    pub fn set_minimum_threshold(&mut self, threshold: i64) -> CoreResult<()> {
        validate_threshold(threshold)?;
        self.minimum_threshold = threshold;
        Ok(())
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub(crate) fn set_available_units(&mut self, units: i64) {
        debug_assert!(units >= 0, "stock must never go negative");
        self.available_units = units;
    }
}

// =============================================================================
// Product Field (update target)
// =============================================================================

/// One field of a product to overwrite via
/// [`ProductRegistry::update`](crate::registry::ProductRegistry::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductField {
    Name(String),
    Category(String),
    Code(String),
    Price(Money),
    Vat(TaxRate),
    MinimumThreshold(i64),
}

// =============================================================================
// Sale
// =============================================================================

/// Accumulated profit for one product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    product_name: String,
    total_profit: Money,
}

impl Sale {
    pub(crate) fn new(product_name: &str, amount: Money) -> Self {
        Sale {
            product_name: product_name.to_string(),
            total_profit: amount,
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn total_profit(&self) -> Money {
        self.total_profit
    }

    pub fn is_for(&self, name: &str) -> bool {
        names_match(&self.product_name, name)
    }

    pub(crate) fn set_total_profit(&mut self, total: Money) {
        self.total_profit = total;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
