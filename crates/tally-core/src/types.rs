//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │   Department    │   │    Quarter      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  date_sold      │   │  Menswear       │   │  Q1  Jan-Mar    │       │
//! │  │  department     │   │  Womenswear     │   │  Q2  Apr-Jun    │       │
//! │  │  product_id     │   │  ...            │   │  Q3  Jul-Sep    │       │
//! │  │  quantity_sold  │   │  Outerwear      │   │  Q4  Oct-Dec    │       │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  base_cost      │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐                              │
//! │                        │     Margin      │                              │
//! │                        │  ─────────────  │                              │
//! │                        │  bps (i64)      │                              │
//! │                        │  833 = 8.33%    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    validate_base_cost, validate_order_total, validate_product_id, validate_quantity,
    validate_unit_price,
};

// =============================================================================
// Margin
// =============================================================================

/// Profit as a share of sales, in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, which is exactly the two decimals the
/// report prints. 833 bps = 8.33%.
///
/// ## Zero Sales
/// A margin over zero sales is undefined. [`Margin::from_ratio`] returns
/// [`Margin::zero`] in that case instead of producing NaN or infinity, so the
/// report prints `0.00`. Validated records always have positive sales, so this
/// only matters for hand-built totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Margin(i64);

impl Margin {
    /// Computes `profit / sales`, rounded half away from zero to the basis point.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::Margin;
    ///
    /// let margin = Margin::from_ratio(Money::from_cents(12_500), Money::from_cents(150_000));
    /// assert_eq!(margin.bps(), 833);
    /// assert_eq!(margin.to_string(), "8.33");
    ///
    /// assert!(Margin::from_ratio(Money::from_cents(100), Money::zero()).is_zero());
    /// ```
    pub fn from_ratio(profit: Money, sales: Money) -> Self {
        if sales.is_zero() {
            return Margin::zero();
        }

        let mut numerator = profit.cents() as i128 * 10_000;
        let mut denominator = sales.cents() as i128;
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        let magnitude = (numerator.abs() * 2 + denominator) / (denominator * 2);
        let bps = if numerator < 0 { -magnitude } else { magnitude };
        Margin(bps as i64)
    }

    /// Returns the margin in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the margin as a percentage (for display and JSON only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero margin.
    #[inline]
    pub const fn zero() -> Self {
        Margin(0)
    }

    /// Checks if the margin is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Margin {
    fn default() -> Self {
        Margin::zero()
    }
}

/// Displays the percentage with two decimals and no `%` sign: `8.33`.
impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
    }
}

// =============================================================================
// Department
// =============================================================================

/// The catalogue department a product is sold under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Menswear,
    Womenswear,
    Childrenswear,
    Footwear,
    Accessories,
    Sportswear,
    Underwear,
    Outerwear,
}

impl Department {
    /// Every department, in catalogue order.
    pub const ALL: [Department; 8] = [
        Department::Menswear,
        Department::Womenswear,
        Department::Childrenswear,
        Department::Footwear,
        Department::Accessories,
        Department::Sportswear,
        Department::Underwear,
        Department::Outerwear,
    ];

    /// Display name, as printed in the department table.
    pub const fn name(&self) -> &'static str {
        match self {
            Department::Menswear => "Menswear",
            Department::Womenswear => "Womenswear",
            Department::Childrenswear => "Childrenswear",
            Department::Footwear => "Footwear",
            Department::Accessories => "Accessories",
            Department::Sportswear => "Sportswear",
            Department::Underwear => "Underwear",
            Department::Outerwear => "Outerwear",
        }
    }

    /// Four-letter abbreviation used as the product ID prefix.
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Department::Menswear => "MENS",
            Department::Womenswear => "WMNS",
            Department::Childrenswear => "CHLD",
            Department::Footwear => "FTWR",
            Department::Accessories => "ACCS",
            Department::Sportswear => "SPRT",
            Department::Underwear => "UNDR",
            Department::Outerwear => "OUTR",
        }
    }

    /// One-based catalogue position (Menswear = 1 ... Outerwear = 8).
    pub const fn code(&self) -> u8 {
        *self as u8 + 1
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    /// Accepts the display name or the abbreviation, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Department::ALL
            .into_iter()
            .find(|d| {
                d.name().eq_ignore_ascii_case(wanted) || d.abbreviation().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::UnknownDepartment(s.to_string()))
    }
}

// =============================================================================
// Quarter
// =============================================================================

/// A calendar quarter, the report's period key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Every quarter, in canonical report order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Maps a month number (1-12) to its quarter.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::types::Quarter;
    ///
    /// assert_eq!(Quarter::from_month(3), Some(Quarter::Q1));
    /// assert_eq!(Quarter::from_month(4), Some(Quarter::Q2));
    /// assert_eq!(Quarter::from_month(12), Some(Quarter::Q4));
    /// assert_eq!(Quarter::from_month(13), None);
    /// ```
    pub const fn from_month(month: u32) -> Option<Quarter> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }

    /// Same as [`Quarter::from_month`], as a `CoreResult`.
    pub fn try_from_month(month: u32) -> CoreResult<Quarter> {
        Quarter::from_month(month).ok_or(CoreError::InvalidMonth(month))
    }

    /// The quarter a date falls in. Total, since a date's month is always 1-12.
    pub fn of(date: NaiveDate) -> Quarter {
        match date.month0() / 3 {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Label printed in the report ("Q1" ... "Q4").
    pub const fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Quarter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quarter::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownQuarter(s.to_string()))
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One sales transaction: a quantity of one product sold on one day.
///
/// Records are immutable once built. [`SaleRecord::new`] is the only way to
/// build one and enforces the data-model invariants:
/// - `quantity_sold > 0`
/// - `unit_price > 0`
/// - `0 ≤ base_cost ≤ unit_price`
/// - `product_id` is not blank
/// - `quantity_sold × unit_price` fits in i64 cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    date_sold: NaiveDate,
    department: Department,
    product_id: String,
    quantity_sold: i64,
    unit_price: Money,
    base_cost: Money,
}

impl SaleRecord {
    /// Builds a validated record.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use tally_core::money::Money;
    /// use tally_core::types::{Department, Quarter, SaleRecord};
    ///
    /// let record = SaleRecord::new(
    ///     NaiveDate::from_ymd_opt(2023, 2, 14).unwrap(),
    ///     Department::Menswear,
    ///     "MENS-101-M-BK-US1",
    ///     10,
    ///     Money::from_cents(10_000),
    ///     Money::from_cents(9_000),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(record.quarter(), Quarter::Q1);
    /// assert_eq!(record.total_sales().cents(), 100_000);
    /// assert_eq!(record.total_profit().cents(), 10_000);
    /// ```
    pub fn new(
        date_sold: NaiveDate,
        department: Department,
        product_id: impl Into<String>,
        quantity_sold: i64,
        unit_price: Money,
        base_cost: Money,
    ) -> CoreResult<Self> {
        let product_id = product_id.into();

        let checks = validate_product_id(&product_id)
            .and_then(|_| validate_quantity(quantity_sold))
            .and_then(|_| validate_unit_price(unit_price))
            .and_then(|_| validate_base_cost(base_cost, unit_price))
            .and_then(|_| validate_order_total(quantity_sold, unit_price));

        if let Err(source) = checks {
            return Err(CoreError::InvalidRecord { product_id, source });
        }

        Ok(SaleRecord {
            date_sold,
            department,
            product_id,
            quantity_sold,
            unit_price,
            base_cost,
        })
    }

    #[inline]
    pub fn date_sold(&self) -> NaiveDate {
        self.date_sold
    }

    #[inline]
    pub fn department(&self) -> Department {
        self.department
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[inline]
    pub fn quantity_sold(&self) -> i64 {
        self.quantity_sold
    }

    /// Sale price per unit.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Cost per unit.
    #[inline]
    pub fn base_cost(&self) -> Money {
        self.base_cost
    }

    /// The quarter this record is reported under.
    #[inline]
    pub fn quarter(&self) -> Quarter {
        Quarter::of(self.date_sold)
    }

    /// `quantity_sold × unit_price`
    #[inline]
    pub fn total_sales(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity_sold)
    }

    /// `(unit_price − base_cost) × quantity_sold`
    #[inline]
    pub fn total_profit(&self) -> Money {
        (self.unit_price - self.base_cost).multiply_quantity(self.quantity_sold)
    }

    /// Profit percentage of this single order.
    pub fn margin(&self) -> Margin {
        Margin::from_ratio(self.total_profit(), self.total_sales())
    }

    /// 10% of the quantity sold, truncated.
    ///
    /// Informational only; it does not feed the aggregation.
    #[inline]
    pub fn volume_discount(&self) -> i64 {
        self.quantity_sold / 10
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
