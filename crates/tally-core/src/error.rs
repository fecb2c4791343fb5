//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Record and domain failures                     │
//! │  └── ValidationError  - Field-level validation failures                │
//! │                                                                         │
//! │  tally-synth errors (separate crate)                                   │
//! │  └── SynthError       - Generator configuration failures               │
//! │                                                                         │
//! │  report app errors                                                     │
//! │  └── ReportError      - Config, output and I/O failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SynthError → ReportError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, field, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale record broke one of the data-model invariants.
    ///
    /// ## When This Occurs
    /// - Quantity is zero or negative
    /// - Unit price is zero or negative
    /// - Base cost is negative or above the unit price
    /// - Product ID is blank
    /// - `unit_price × quantity` does not fit in i64 cents
    ///
    /// ## Flow
    /// ```text
    /// SaleRecord::new(.., quantity: 0, ..)
    ///      │
    ///      ▼
    /// validate_quantity(0) → MustBePositive { field: "quantity" }
    ///      │
    ///      ▼
    /// InvalidRecord { product_id: "MENS-101-M-BK-US1", source: .. }
    /// ```
    #[error("Invalid record {product_id}: {source}")]
    InvalidRecord {
        product_id: String,
        #[source]
        source: ValidationError,
    },

    /// Department name is not one of the fixed catalogue departments.
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Quarter label could not be parsed.
    #[error("Unknown quarter: {0}")]
    UnknownQuarter(String),

    /// Month number outside 1-12.
    #[error("Month {0} is outside 1-12")]
    InvalidMonth(u32),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a field value doesn't meet requirements.
/// Used for early validation before a record enters the aggregation pass.
#[derive(Debug, Error)]
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

    /// Value must not exceed another field.
    #[error("{field} must not exceed {limit}")]
    Exceeds { field: String, limit: String },

    /// Derived amount does not fit in i64 cents.
    #[error("{field} overflows the supported money range")]
    Overflow { field: String },
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
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidRecord {
            product_id: "MENS-101-M-BK-US1".to_string(),
            source: ValidationError::MustBePositive {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid record MENS-101-M-BK-US1: quantity must be positive"
        );
        assert!(err.source().is_some());

        assert_eq!(CoreError::InvalidMonth(13).to_string(), "Month 13 is outside 1-12");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product_id".to_string(),
        };
        assert_eq!(err.to_string(), "product_id is required");

        let err = ValidationError::Exceeds {
            field: "base_cost".to_string(),
            limit: "unit_price".to_string(),
        };
        assert_eq!(err.to_string(), "base_cost must not exceed unit_price");

        let err = ValidationError::Overflow {
            field: "total_sales".to_string(),
        };
        assert_eq!(err.to_string(), "total_sales overflows the supported money range");
    }
}
