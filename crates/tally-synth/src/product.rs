//! # Product Identifiers
//!
//! Structured product codes for generated records.
//!
//! ## Format
//! ```text
//! MENS-107-M-BK-US1
//! ──┬─ ─┬┬ ┬ ─┬ ─┬─
//!   │   ││ │  │  └── manufacturing site
//!   │   ││ │  └───── colour
//!   │   ││ └──────── size
//!   │   │└────────── style number (01-99)
//!   │   └─────────── department code (1-8)
//!   └─────────────── department abbreviation
//! ```

use rand::Rng;
use std::fmt;

use tally_core::Department;

/// Garment sizes.
pub const SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];

/// Colour codes.
pub const COLORS: [&str; 8] = ["BK", "BL", "GR", "RD", "YL", "OR", "WT", "GY"];

/// Manufacturing sites.
pub const SITES: [&str; 10] = [
    "US1", "US2", "CA1", "CA2", "MX1", "MX2", "DE1", "DE2", "JP1", "JP2",
];

/// A product code, rendered through `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCode {
    pub department: Department,
    /// Style number within the department, 1-99.
    pub style: u8,
    pub size: &'static str,
    pub color: &'static str,
    pub site: &'static str,
}

impl ProductCode {
    /// Draws a code for a product in `department`.
    pub fn random<R: Rng + ?Sized>(department: Department, rng: &mut R) -> Self {
        ProductCode {
            department,
            style: rng.gen_range(1..=99),
            size: SIZES[rng.gen_range(0..SIZES.len())],
            color: COLORS[rng.gen_range(0..COLORS.len())],
            site: SITES[rng.gen_range(0..SITES.len())],
        }
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{:02}-{}-{}-{}",
            self.department.abbreviation(),
            self.department.code(),
            self.style,
            self.size,
            self.color,
            self.site
        )
    }
}
