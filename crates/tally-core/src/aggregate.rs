//! # Quarterly Aggregation
//!
//! Single forward pass over sale records, producing quarter totals,
//! quarter-by-department totals, and the most profitable orders per quarter.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aggregation Pass                                 │
//! │                                                                         │
//! │  SaleRecord ──► quarter = Quarter::of(date_sold)                        │
//! │      │          sales   = qty × unit_price                             │
//! │      │          profit  = (unit_price − base_cost) × qty               │
//! │      │                                                                  │
//! │      ├──► quarters[quarter]               += (sales, profit)            │
//! │      ├──► departments[(quarter, dept)]    += (sales, profit)            │
//! │      └──► top_orders[quarter].offer(record)   (bounded, stable)         │
//! │                                                                         │
//! │  Entries are created on first use and only ever added to, so a         │
//! │  quarter with no records never shows up in any map.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use tally_core::aggregate::aggregate;
//! use tally_core::money::Money;
//! use tally_core::types::{Department, Quarter, SaleRecord};
//!
//! let day = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
//! let records = vec![
//!     SaleRecord::new(day, Department::Menswear, "A-1", 10,
//!         Money::from_cents(10_000), Money::from_cents(9_000)).unwrap(),
//!     SaleRecord::new(day, Department::Menswear, "A-2", 5,
//!         Money::from_cents(10_000), Money::from_cents(9_500)).unwrap(),
//! ];
//!
//! let report = aggregate(&records);
//! let q1 = report.quarter_totals(Quarter::Q1).unwrap();
//! assert_eq!(q1.sales.cents(), 150_000);
//! assert_eq!(q1.profit.cents(), 12_500);
//! assert_eq!(report.top_orders(Quarter::Q1)[0].product_id(), "A-1");
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use crate::money::Money;
use crate::types::{Department, Margin, Quarter, SaleRecord};
use crate::TOP_ORDERS_PER_QUARTER;

// =============================================================================
// Totals
// =============================================================================

/// Running sales and profit for one group of records.
///
/// ## Supported Magnitude
/// Each record's totals are checked at construction, but sums are plain i64
/// adds. Total sales over every ingested record must stay below `i64::MAX`
/// cents (about $92 quadrillion); profit is bounded by sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub sales: Money,
    pub profit: Money,
}

impl Totals {
    pub const fn new(sales: Money, profit: Money) -> Self {
        Totals { sales, profit }
    }

    /// The totals a single record contributes.
    pub fn of(record: &SaleRecord) -> Self {
        Totals::new(record.total_sales(), record.total_profit())
    }

    /// Profit percentage of the group (zero when sales are zero).
    pub fn margin(&self) -> Margin {
        Margin::from_ratio(self.profit, self.sales)
    }
}

impl Add for Totals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Totals::new(self.sales + other.sales, self.profit + other.profit)
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.sales += other.sales;
        self.profit += other.profit;
    }
}

// =============================================================================
// Top Orders
// =============================================================================

/// The most profitable orders seen so far, highest profit first.
///
/// ## Ordering
/// Equal profits keep arrival order: an order offered earlier ranks above a
/// later one with the same profit. Offering a record is equivalent to
/// appending it, stable-sorting descending by profit, and truncating to
/// capacity, without the sort.
///
/// ```text
/// capacity 3, held: [100, 40, 40]
///
/// offer(40)  → goes after every held order with profit ≥ 40 → position 3
///              → beyond capacity, dropped         → [100, 40, 40]
/// offer(60)  → first held order with profit < 60 is at 1
///              → insert, truncate                 → [100, 60, 40]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopOrders {
    capacity: usize,
    orders: Vec<SaleRecord>,
}

impl TopOrders {
    /// Creates an empty ranking holding at most `capacity` orders.
    pub fn new(capacity: usize) -> Self {
        TopOrders {
            capacity,
            orders: Vec::with_capacity(capacity + 1),
        }
    }

    /// Offers a record to the ranking, keeping it only if it places.
    pub fn offer(&mut self, record: &SaleRecord) {
        let profit = record.total_profit();
        let position = self
            .orders
            .iter()
            .position(|held| held.total_profit() < profit)
            .unwrap_or(self.orders.len());

        if position >= self.capacity {
            return;
        }

        self.orders.insert(position, record.clone());
        self.orders.truncate(self.capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn as_slice(&self) -> &[SaleRecord] {
        &self.orders
    }

    pub fn into_vec(self) -> Vec<SaleRecord> {
        self.orders
    }
}

// =============================================================================
// Aggregator
// =============================================================================

/// Accumulates records one at a time; [`Aggregator::finish`] yields the report.
#[derive(Debug, Clone)]
pub struct Aggregator {
    top_n: usize,
    records: usize,
    quarters: BTreeMap<Quarter, Totals>,
    departments: BTreeMap<(Quarter, Department), Totals>,
    top_orders: BTreeMap<Quarter, TopOrders>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator::new()
    }
}

impl Aggregator {
    /// Creates an aggregator that ranks the top 3 orders per quarter.
    pub fn new() -> Self {
        Aggregator::with_top_n(TOP_ORDERS_PER_QUARTER)
    }

    /// Creates an aggregator that ranks the top `top_n` orders per quarter.
    pub fn with_top_n(top_n: usize) -> Self {
        Aggregator {
            top_n,
            records: 0,
            quarters: BTreeMap::new(),
            departments: BTreeMap::new(),
            top_orders: BTreeMap::new(),
        }
    }

    /// Folds one record into every running aggregate.
    pub fn ingest(&mut self, record: &SaleRecord) {
        let quarter = record.quarter();
        let totals = Totals::of(record);

        *self.quarters.entry(quarter).or_default() += totals;
        *self
            .departments
            .entry((quarter, record.department()))
            .or_default() += totals;

        let top_n = self.top_n;
        self.top_orders
            .entry(quarter)
            .or_insert_with(|| TopOrders::new(top_n))
            .offer(record);

        self.records += 1;
    }

    /// Records ingested so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Ends the pass.
    pub fn finish(self) -> QuarterlyReport {
        QuarterlyReport {
            records: self.records,
            quarters: self.quarters,
            departments: self.departments,
            top_orders: self
                .top_orders
                .into_iter()
                .map(|(quarter, ranking)| (quarter, ranking.into_vec()))
                .collect(),
        }
    }
}

impl<'a> Extend<&'a SaleRecord> for Aggregator {
    fn extend<I: IntoIterator<Item = &'a SaleRecord>>(&mut self, records: I) {
        for record in records {
            self.ingest(record);
        }
    }
}

/// Aggregates a whole sequence of records in one pass.
pub fn aggregate<'a, I>(records: I) -> QuarterlyReport
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut aggregator = Aggregator::new();
    aggregator.extend(records);
    aggregator.finish()
}

// =============================================================================
// Quarterly Report
// =============================================================================

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterlyReport {
    records: usize,
    quarters: BTreeMap<Quarter, Totals>,
    departments: BTreeMap<(Quarter, Department), Totals>,
    top_orders: BTreeMap<Quarter, Vec<SaleRecord>>,
}

impl QuarterlyReport {
    /// Number of records aggregated.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Quarters with at least one record, Q1 first.
    pub fn quarters(&self) -> impl Iterator<Item = Quarter> + '_ {
        self.quarters.keys().copied()
    }

    pub fn quarter_totals(&self, quarter: Quarter) -> Option<Totals> {
        self.quarters.get(&quarter).copied()
    }

    /// Departments with any activity in `quarter`, sorted by name.
    pub fn department_totals(&self, quarter: Quarter) -> Vec<(Department, Totals)> {
        let mut rows: Vec<(Department, Totals)> = self
            .departments
            .range((quarter, Department::Menswear)..=(quarter, Department::Outerwear))
            .map(|(&(_, department), &totals)| (department, totals))
            .collect();
        rows.sort_by_key(|(department, _)| department.name());
        rows
    }

    pub fn department_total(&self, quarter: Quarter, department: Department) -> Option<Totals> {
        self.departments.get(&(quarter, department)).copied()
    }

    /// Most profitable orders of `quarter`, highest first. Empty for quarters
    /// without records.
    pub fn top_orders(&self, quarter: Quarter) -> &[SaleRecord] {
        self.top_orders
            .get(&quarter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum over every quarter.
    pub fn grand_totals(&self) -> Totals {
        self.quarters
            .values()
            .fold(Totals::default(), |acc, totals| acc + *totals)
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(month: u32, department: Department, id: &str, qty: i64, price: i64, cost: i64) -> SaleRecord {
        SaleRecord::new(
            NaiveDate::from_ymd_opt(2023, month, 10).unwrap(),
            department,
            id,
            qty,
            Money::from_cents(price),
            Money::from_cents(cost),
        )
        .unwrap()
    }

    /// Record with a given profit in cents (qty 1, price 10_000).
    fn with_profit(month: u32, id: &str, profit: i64) -> SaleRecord {
        sale(month, Department::Footwear, id, 1, 10_000, 10_000 - profit)
    }

    fn ids(records: &[SaleRecord]) -> Vec<&str> {
        records.iter().map(SaleRecord::product_id).collect()
    }

    #[test]
    fn test_menswear_scenario() {
        let records = vec![
            sale(2, Department::Menswear, "MENS-101-M-BK-US1", 10, 10_000, 9_000),
            sale(2, Department::Menswear, "MENS-102-L-BL-US2", 5, 10_000, 9_500),
        ];

        let report = aggregate(&records);

        let q1 = report.quarter_totals(Quarter::Q1).unwrap();
        assert_eq!(q1.sales, Money::from_cents(150_000));
        assert_eq!(q1.profit, Money::from_cents(12_500));
        assert_eq!(q1.margin().to_string(), "8.33");

        let departments = report.department_totals(Quarter::Q1);
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].0, Department::Menswear);
        assert_eq!(departments[0].1, q1);

        let top = report.top_orders(Quarter::Q1);
        assert_eq!(ids(top), vec!["MENS-101-M-BK-US1", "MENS-102-L-BL-US2"]);
        assert_eq!(top[0].total_profit().cents(), 10_000);
        assert_eq!(top[1].total_profit().cents(), 2_500);
    }

    #[test]
    fn test_absent_quarters_are_not_reported() {
        let records = vec![with_profit(5, "a", 100), with_profit(11, "b", 100)];
        let report = aggregate(&records);

        assert_eq!(report.quarters().collect::<Vec<_>>(), vec![Quarter::Q2, Quarter::Q4]);
        assert!(report.quarter_totals(Quarter::Q1).is_none());
        assert!(report.department_totals(Quarter::Q3).is_empty());
        assert!(report.top_orders(Quarter::Q3).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(&[]);
        assert!(report.is_empty());
        assert_eq!(report.quarters().count(), 0);
        assert_eq!(report.grand_totals(), Totals::default());
    }

    #[test]
    fn test_top_orders_boundary_sizes() {
        for (count, expected) in [(0, 0), (1, 1), (2, 2), (3, 3), (4, 3), (9, 3)] {
            let records: Vec<SaleRecord> = (0..count)
                .map(|i| with_profit(7, &format!("r{i}"), 10 * (i + 1)))
                .collect();
            let report = aggregate(&records);
            assert_eq!(report.top_orders(Quarter::Q3).len(), expected, "count {count}");
        }
    }

    #[test]
    fn test_top_orders_sorted_descending() {
        let records = vec![
            with_profit(1, "low", 10),
            with_profit(1, "high", 900),
            with_profit(1, "mid", 300),
            with_profit(1, "lowest", 1),
        ];
        let report = aggregate(&records);
        assert_eq!(ids(report.top_orders(Quarter::Q1)), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_top_orders_ties_keep_arrival_order() {
        let records = vec![
            with_profit(4, "first", 50),
            with_profit(4, "second", 50),
            with_profit(4, "third", 50),
            with_profit(4, "fourth", 50),
        ];
        let report = aggregate(&records);
        assert_eq!(
            ids(report.top_orders(Quarter::Q2)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_top_orders_later_higher_profit_displaces_tie() {
        let mut ranking = TopOrders::new(3);
        ranking.offer(&with_profit(1, "a", 100));
        ranking.offer(&with_profit(1, "b", 40));
        ranking.offer(&with_profit(1, "c", 40));
        ranking.offer(&with_profit(1, "d", 40));
        assert_eq!(ids(ranking.as_slice()), vec!["a", "b", "c"]);

        ranking.offer(&with_profit(1, "e", 60));
        assert_eq!(ids(ranking.as_slice()), vec!["a", "e", "b"]);
    }

    #[test]
    fn test_top_orders_zero_capacity_holds_nothing() {
        let mut ranking = TopOrders::new(0);
        ranking.offer(&with_profit(1, "a", 100));
        assert!(ranking.is_empty());
        assert_eq!(ranking.capacity(), 0);
    }

    #[test]
    fn test_with_top_n() {
        let records: Vec<SaleRecord> = (0..6)
            .map(|i| with_profit(10, &format!("r{i}"), 10 * (i + 1)))
            .collect();
        let mut aggregator = Aggregator::with_top_n(5);
        aggregator.extend(&records);
        let report = aggregator.finish();
        assert_eq!(
            ids(report.top_orders(Quarter::Q4)),
            vec!["r5", "r4", "r3", "r2", "r1"]
        );
    }

    #[test]
    fn test_department_rows_sorted_by_name() {
        let records = vec![
            sale(8, Department::Underwear, "u", 1, 1_000, 900),
            sale(8, Department::Accessories, "a", 1, 1_000, 900),
            sale(8, Department::Menswear, "m", 1, 1_000, 900),
            sale(8, Department::Footwear, "f", 1, 1_000, 900),
        ];
        let report = aggregate(&records);
        let names: Vec<&str> = report
            .department_totals(Quarter::Q3)
            .iter()
            .map(|(d, _)| d.name())
            .collect();
        assert_eq!(names, vec!["Accessories", "Footwear", "Menswear", "Underwear"]);
    }

    #[test]
    fn test_departments_split_by_quarter() {
        let records = vec![
            sale(1, Department::Outerwear, "a", 2, 5_000, 4_000),
            sale(12, Department::Outerwear, "b", 1, 5_000, 4_500),
            sale(2, Department::Outerwear, "c", 1, 1_000, 1_000),
        ];
        let report = aggregate(&records);

        let q1 = report.department_total(Quarter::Q1, Department::Outerwear).unwrap();
        assert_eq!(q1, Totals::new(Money::from_cents(11_000), Money::from_cents(2_000)));

        let q4 = report.department_total(Quarter::Q4, Department::Outerwear).unwrap();
        assert_eq!(q4, Totals::new(Money::from_cents(5_000), Money::from_cents(500)));

        assert!(report.department_total(Quarter::Q1, Department::Menswear).is_none());
    }

    #[test]
    fn test_grand_totals_and_record_count() {
        let records = vec![
            sale(3, Department::Sportswear, "a", 4, 2_500, 2_000),
            sale(6, Department::Womenswear, "b", 1, 9_999, 9_000),
        ];
        let report = aggregate(&records);
        assert_eq!(report.record_count(), 2);
        assert_eq!(
            report.grand_totals(),
            Totals::new(Money::from_cents(19_999), Money::from_cents(2_999))
        );
    }

    #[test]
    fn test_incremental_matches_batch() {
        let records = vec![
            with_profit(2, "a", 5),
            with_profit(9, "b", 7),
            with_profit(2, "c", 9),
        ];
        let mut aggregator = Aggregator::new();
        for record in &records {
            aggregator.ingest(record);
        }
        assert_eq!(aggregator.record_count(), 3);
        assert_eq!(aggregator.finish(), aggregate(&records));
    }

    #[test]
    fn test_totals_margin_guards_zero_sales() {
        assert!(Totals::default().margin().is_zero());
    }
}
