//! # Money Module
//!
//! Provides the `Money` type for sale prices, sale amounts and profits.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Accumulating profit with floats drifts:                                │
//! │    33.0 + 0.1 + 0.2 = 33.300000000000004  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3300 + 10 + 20 = 3330 cents, exactly                                 │
//! │    Rounding happens once, when VAT is applied to a sale line            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! Sale arithmetic is checked and returns `None` when a value leaves the
//! `i64` range; callers turn that into an error before touching any state.
//! Summing for report totals saturates instead, since a report cannot fail.
//!
//! ## Usage
//! ```rust
//! use stockbook_core::money::Money;
//! use stockbook_core::types::TaxRate;
//!
//! let price = Money::from_cents(1000);                           // 10.00
//! let line = price.checked_mul(3).unwrap();                      // 30.00
//! let amount = line.with_tax(TaxRate::from_bps(1000)).unwrap();  // +10% VAT
//! assert_eq!(amount.cents(), 3300);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Currency is deliberately absent; symbols belong to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates the VAT portion of this amount, rounded half up to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000`. `None` if the
    /// tax does not fit back into an `i64`.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    /// use stockbook_core::types::TaxRate;
    ///
    /// // 10.00 at 8.25% = 0.825 → 0.83
    /// let tax = Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825));
    /// assert_eq!(tax.map(|t| t.cents()), Some(83));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        i64::try_from(tax_cents).ok().map(Money)
    }

    /// Returns this amount with VAT added: `amount * (100 + vat) / 100`.
    #[inline]
    pub fn with_tax(&self, rate: TaxRate) -> Option<Money> {
        self.calculate_tax(rate)?.checked_add(*self)
    }

    /// Multiplies by a unit count, `None` on overflow.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(299).checked_mul(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub fn checked_mul(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Checked addition, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Addition clamped to the `i64` range.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.major().abs(), self.minor());
        f.pad(&text)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating sum, used for report totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
