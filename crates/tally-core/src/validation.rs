//! # Validation Module
//!
//! Record-level validation for sale records entering the aggregation pass.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Record Source (tally-synth)                                  │
//! │  └── Draws fields inside their documented ranges                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: SaleRecord::new (tally-core)                                 │
//! │  └── THIS MODULE: data-model invariants                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregator                                                   │
//! │  └── No defensive branching, records are trusted from here on         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::validation::{validate_product_id, validate_base_cost};
//!
//! validate_product_id("MENS-101-M-BK-US1").unwrap();
//! assert!(validate_base_cost(Money::from_cents(9500), Money::from_cents(9000)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// Identifiers are opaque: any text is accepted as long as something is
/// left after trimming whitespace.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_product_id;
///
/// assert!(validate_product_id("MENS-101-M-BK-US1").is_ok());
/// assert!(validate_product_id("SKU 42/blue").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    if product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity sold on an order. Must be positive (> 0).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity_sold".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit sale price.
///
/// ## Rules
/// - Must be positive; a zero price would make the profit percentage undefined
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit base cost against its sale price.
///
/// ## Rules
/// - Must be non-negative
/// - Must not exceed the unit price (`0 ≤ base_cost ≤ unit_price`)
pub fn validate_base_cost(cost: Money, price: Money) -> ValidationResult<()> {
    if cost.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "base_cost".to_string(),
            min: 0,
            max: price.cents(),
        });
    }

    if cost > price {
        return Err(ValidationError::Exceeds {
            field: "base_cost".to_string(),
            limit: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates that `unit_price × quantity` is representable in cents.
///
/// Profit per order is never larger than sales (`0 ≤ base_cost ≤ unit_price`),
/// so this also bounds `total_profit`.
pub fn validate_order_total(qty: i64, price: Money) -> ValidationResult<()> {
    if price.checked_multiply_quantity(qty).is_none() {
        return Err(ValidationError::Overflow {
            field: "total_sales".to_string(),
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
    fn test_validate_product_id() {
        assert!(validate_product_id("MENS-101-M-BK-US1").is_ok());
        assert!(validate_product_id("ABC123").is_ok());
        assert!(validate_product_id("product_1").is_ok());
        assert!(validate_product_id("SKU 42/blue").is_ok());
        assert!(validate_product_id(&"A".repeat(100)).is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(1_000_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_order_total() {
        assert!(validate_order_total(100, Money::from_cents(29_999)).is_ok());
        assert!(validate_order_total(1, Money::from_cents(i64::MAX)).is_ok());

        assert!(matches!(
            validate_order_total(100, Money::from_cents(i64::MAX / 50)),
            Err(ValidationError::Overflow { .. })
        ));
        assert!(validate_order_total(i64::MAX, Money::from_cents(2)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_base_cost() {
        let price = Money::from_cents(10_000);
        assert!(validate_base_cost(Money::zero(), price).is_ok());
        assert!(validate_base_cost(Money::from_cents(9000), price).is_ok());
        assert!(validate_base_cost(price, price).is_ok());

        assert!(matches!(
            validate_base_cost(Money::from_cents(10_001), price),
            Err(ValidationError::Exceeds { .. })
        ));
        assert!(matches!(
            validate_base_cost(Money::from_cents(-1), price),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
