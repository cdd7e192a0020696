//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  ├── CoreError        - Registry / ledger operation failures           │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  console errors (apps/console)                                         │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is local to the single product or sale being processed.
//! None of them is fatal: a batch keeps going after an item fails.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Registry and ledger operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A quantity or value is not acceptable for the operation.
    ///
    /// ## When This Occurs
    /// - Restocking or selling zero / negative units
    /// - Stock arithmetic would overflow
    /// - Updating price or threshold to an invalid value
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// No product matches the (case-insensitive) name.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Sale request exceeds the units on hand, or stock is zero.
    ///
    /// ## User Workflow
    /// ```text
    /// sell Widget:3
    ///      │
    ///      ▼
    /// Check stock: available=2
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Widget", available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// Stock untouched, ledger untouched, next item in the batch proceeds
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidArgument`].
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors raised while building or updating a Product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., renaming onto another product's name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Widget".to_string(),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Widget: available 2, requested 3"
        );

        let err = CoreError::invalid("units", "must be positive");
        assert_eq!(err.to_string(), "Invalid units: must be positive");

        let err = CoreError::NotFound("Gadget".to_string());
        assert_eq!(err.to_string(), "Product not found: Gadget");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "name".to_string(),
            value: "Widget".to_string(),
        };
        assert_eq!(err.to_string(), "name 'Widget' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
