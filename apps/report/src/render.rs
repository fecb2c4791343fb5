//! # Report Rendering
//!
//! Turns a [`QuarterlyReport`] into console tables or a JSON document.
//!
//! ## Text Layout (per quarter, Q1 first)
//! ```text
//! Q1: Sales: $1,500.00, Profit: $125.00, Profit Percentage: 8.33%
//!   By Department:
//!   +-----------------+-----------------+-----------------+-------------------+
//!   | Department      |           Sales |          Profit | Profit Percentage |
//!   +-----------------+-----------------+-----------------+-------------------+
//!   | Menswear        |       $1,500.00 |         $125.00 |              8.33 |
//!   +-----------------+-----------------+-----------------+-------------------+
//!
//!   Top 3 Sales Orders:
//!   +----------------------+ ... one row per ranked order ...
//! ```

use serde::Serialize;
use std::fmt::{self, Write};

use tally_core::{Department, Quarter, QuarterlyReport, SaleRecord, Totals, TOP_ORDERS_PER_QUARTER};

use crate::error::ReportResult;

/// Report heading.
pub const TITLE: &str = "Quarterly Sales and Profits Report";

/// Indent for everything under a quarter's summary line.
const INDENT: &str = "  ";

// =============================================================================
// Table Layout
// =============================================================================

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const fn column(header: &'static str, width: usize, align: Align) -> Column {
    Column {
        header,
        width,
        align,
    }
}

const DEPARTMENT_COLUMNS: [Column; 4] = [
    column("Department", 15, Align::Left),
    column("Sales", 15, Align::Right),
    column("Profit", 15, Align::Right),
    column("Profit Percentage", 17, Align::Right),
];

const ORDER_COLUMNS: [Column; 6] = [
    column("Product ID", 20, Align::Left),
    column("Quantity Sold", 13, Align::Right),
    column("Unit Price", 12, Align::Right),
    column("Total Sales", 15, Align::Right),
    column("Profit", 15, Align::Right),
    column("Profit Percentage", 17, Align::Right),
];

/// `+-----+-----+` sized to the columns.
fn border(columns: &[Column]) -> String {
    let mut line = String::from("+");
    for col in columns {
        line.push_str(&"-".repeat(col.width + 2));
        line.push('+');
    }
    line
}

/// `| a | b |` with each cell padded to its column.
fn row(columns: &[Column], cells: &[String]) -> String {
    let mut line = String::from("|");
    for (col, cell) in columns.iter().zip(cells) {
        let padded = match col.align {
            Align::Left => format!(" {:<width$} ", cell, width = col.width),
            Align::Right => format!(" {:>width$} ", cell, width = col.width),
        };
        line.push_str(&padded);
        line.push('|');
    }
    line
}

fn header(columns: &[Column]) -> String {
    let cells: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();
    row(columns, &cells)
}

/// Writes a boxed table, indented under the quarter line.
fn write_table<W: Write>(out: &mut W, columns: &[Column], rows: &[Vec<String>]) -> fmt::Result {
    let rule = border(columns);
    writeln!(out, "{INDENT}{rule}")?;
    writeln!(out, "{INDENT}{}", header(columns))?;
    writeln!(out, "{INDENT}{rule}")?;
    for cells in rows {
        writeln!(out, "{INDENT}{}", row(columns, cells))?;
    }
    writeln!(out, "{INDENT}{rule}")
}

// =============================================================================
// Text Rendering
// =============================================================================

/// One-line quarter summary.
pub fn summary_line(quarter: Quarter, totals: &Totals) -> String {
    format!(
        "{}: Sales: {}, Profit: {}, Profit Percentage: {}%",
        quarter,
        totals.sales,
        totals.profit,
        totals.margin()
    )
}

fn department_cells(department: Department, totals: &Totals) -> Vec<String> {
    vec![
        department.to_string(),
        totals.sales.to_string(),
        totals.profit.to_string(),
        totals.margin().to_string(),
    ]
}

fn order_cells(order: &SaleRecord) -> Vec<String> {
    vec![
        order.product_id().to_string(),
        order.quantity_sold().to_string(),
        order.unit_price().to_string(),
        order.total_sales().to_string(),
        order.total_profit().to_string(),
        order.margin().to_string(),
    ]
}

/// Console rendering of a report, written through `Display`.
///
/// Quarters without records are skipped. Department rows are alphabetical;
/// order rows are highest profit first.
pub struct TextReport<'a>(pub &'a QuarterlyReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{}", "-".repeat(TITLE.len()))?;

        for quarter in report.quarters() {
            let Some(totals) = report.quarter_totals(quarter) else {
                continue;
            };
            writeln!(f, "{}", summary_line(quarter, &totals))?;

            writeln!(f, "{INDENT}By Department:")?;
            let departments: Vec<Vec<String>> = report
                .department_totals(quarter)
                .iter()
                .map(|(department, totals)| department_cells(*department, totals))
                .collect();
            write_table(f, &DEPARTMENT_COLUMNS, &departments)?;
            writeln!(f)?;

            writeln!(f, "{INDENT}Top {TOP_ORDERS_PER_QUARTER} Sales Orders:")?;
            let orders: Vec<Vec<String>> =
                report.top_orders(quarter).iter().map(order_cells).collect();
            write_table(f, &ORDER_COLUMNS, &orders)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Renders the full console report.
pub fn render_text(report: &QuarterlyReport) -> String {
    TextReport(report).to_string()
}

// =============================================================================
// JSON Rendering
// =============================================================================

#[derive(Debug, Serialize)]
struct TotalsView {
    sales_cents: i64,
    profit_cents: i64,
    profit_percentage: f64,
}

impl From<&Totals> for TotalsView {
    fn from(totals: &Totals) -> Self {
        TotalsView {
            sales_cents: totals.sales.cents(),
            profit_cents: totals.profit.cents(),
            profit_percentage: totals.margin().percentage(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DepartmentView {
    department: Department,
    #[serde(flatten)]
    totals: TotalsView,
}

#[derive(Debug, Serialize)]
struct OrderView<'a> {
    product_id: &'a str,
    department: Department,
    date_sold: String,
    quantity_sold: i64,
    unit_price_cents: i64,
    total_sales_cents: i64,
    profit_cents: i64,
    profit_percentage: f64,
}

impl<'a> From<&'a SaleRecord> for OrderView<'a> {
    fn from(order: &'a SaleRecord) -> Self {
        OrderView {
            product_id: order.product_id(),
            department: order.department(),
            date_sold: order.date_sold().to_string(),
            quantity_sold: order.quantity_sold(),
            unit_price_cents: order.unit_price().cents(),
            total_sales_cents: order.total_sales().cents(),
            profit_cents: order.total_profit().cents(),
            profit_percentage: order.margin().percentage(),
        }
    }
}

#[derive(Debug, Serialize)]
struct QuarterView<'a> {
    quarter: Quarter,
    #[serde(flatten)]
    totals: TotalsView,
    departments: Vec<DepartmentView>,
    top_orders: Vec<OrderView<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    title: &'static str,
    record_count: usize,
    totals: TotalsView,
    quarters: Vec<QuarterView<'a>>,
}

/// Renders the report as pretty-printed JSON.
///
/// Money is in integer cents; percentages are plain numbers (8.33 = 8.33%).
pub fn render_json(report: &QuarterlyReport) -> ReportResult<String> {
    let quarters = report
        .quarters()
        .filter_map(|quarter| {
            let totals = report.quarter_totals(quarter)?;
            Some(QuarterView {
                quarter,
                totals: TotalsView::from(&totals),
                departments: report
                    .department_totals(quarter)
                    .iter()
                    .map(|(department, totals)| DepartmentView {
                        department: *department,
                        totals: TotalsView::from(totals),
                    })
                    .collect(),
                top_orders: report.top_orders(quarter).iter().map(OrderView::from).collect(),
            })
        })
        .collect();

    let view = ReportView {
        title: TITLE,
        record_count: report.record_count(),
        totals: TotalsView::from(&report.grand_totals()),
        quarters,
    };

    let mut json = serde_json::to_string_pretty(&view)?;
    json.push('\n');
    Ok(json)
}

// =============================================================================
// Unit Tests
// =============================================================================
