//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally. It turns a sequence of sale records
//! into a quarterly sales and profit report, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/report (quarterly-report)                  │   │
//! │  │      config ──► generate ──► aggregate ──► render ──► stdout    │   │
//! │  └───────────┬────────────────────────┬────────────────────────────┘   │
//! │              │                        │                                 │
//! │  ┌───────────▼───────────┐            │                                 │
//! │  │  tally-synth          │            │                                 │
//! │  │  seeded SaleRecords   │            │                                 │
//! │  └───────────┬───────────┘            │                                 │
//! │              │                        │                                 │
//! │  ┌───────────▼────────────────────────▼────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ aggregate │  │ validation│  │   │
//! │  │   │SaleRecord │  │   Money   │  │Aggregator │  │   rules   │  │   │
//! │  │   │  Quarter  │  │           │  │ TopOrders │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO RANDOMNESS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SaleRecord, Department, Quarter, Margin)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`aggregate`] - The quarterly aggregation pass and top-order ranking
//! - [`error`] - Domain error types
//! - [`validation`] - Record invariant checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same records in the same order = same report
//! 2. **No I/O**: Console, file system and logging live in the app
//! 3. **Integer Money**: All monetary values are in cents (i64), so totals add up exactly
//! 4. **Explicit Errors**: Malformed records are rejected at construction, never mid-pass
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally_core::{aggregate, Department, Money, Quarter, SaleRecord};
//!
//! let record = SaleRecord::new(
//!     NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
//!     Department::Footwear,
//!     "FTWR-412-L-RD-MX1",
//!     2,
//!     Money::from_cents(4_999),
//!     Money::from_cents(4_249),
//! )
//! .unwrap();
//!
//! let report = aggregate(&[record]);
//! assert_eq!(report.quarter_totals(Quarter::Q2).unwrap().profit.cents(), 1_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Money` instead of
// `use tally_core::money::Money`

pub use aggregate::{aggregate, Aggregator, QuarterlyReport, TopOrders, Totals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of most profitable orders ranked per quarter.
pub const TOP_ORDERS_PER_QUARTER: usize = 3;
