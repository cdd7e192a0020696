//! # Validation Module
//!
//! Field validation for products.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console adapter                                              │
//! │  ├── Text → number parsing ("10.50" → 1050 cents)                      │
//! │  └── Malformed input rejected before reaching the core                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product::new and Product setters                                  │
//! │  └── Registry quantity checks (restock / sale units)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockbook_core::validation::{validate_product_name, validate_units};
//!
//! assert!(validate_product_name("Widget").is_ok());
//! assert!(validate_units(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// Must not be empty after trimming. There is no length limit.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale price: strictly positive.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit count used for registration, restock or sale.
pub fn validate_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units".to_string(),
        });
    }

    Ok(())
}

/// Validates a minimum stock threshold: zero or more.
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::OutOfRange {
            field: "minimum threshold".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(5000)).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_units_and_threshold() {
        assert!(validate_units(1).is_ok());
        assert!(validate_units(0).is_err());
        assert!(validate_units(-1).is_err());

        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(-1).is_err());
    }
}
