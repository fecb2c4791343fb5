//! # Sales Generator
//!
//! Draws synthetic sale records from an injected random number generator.
//!
//! ## Field Ranges
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field            Range                                                 │
//! │  ─────────────    ───────────────────────────────────────────────────   │
//! │  date_sold        configured year, month 1-12, day 1-28                 │
//! │  department       uniform over the 8 catalogue departments             │
//! │  product_id       ProductCode for that department                      │
//! │  quantity_sold    1-100                                                 │
//! │  unit_price       $25.00 - $299.99 (whole dollars + random cents)       │
//! │  base_cost        unit_price less a 5%-19% discount (whole percent)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_synth::{GeneratorConfig, SalesGenerator};
//!
//! let config = GeneratorConfig { record_count: 10, ..GeneratorConfig::default() };
//! let records = SalesGenerator::seeded(config, 42).unwrap().generate().unwrap();
//! assert_eq!(records.len(), 10);
//! ```

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use tally_core::{Department, Money, SaleRecord};

use crate::error::{SynthError, SynthResult};
use crate::product::ProductCode;

// =============================================================================
// Constants
// =============================================================================

/// Records generated per run unless configured otherwise.
pub const DEFAULT_RECORD_COUNT: usize = 1000;

/// Sales year unless configured otherwise.
pub const DEFAULT_YEAR: i32 = 2023;

/// Highest day drawn, so every month has it.
const MAX_DAY: u32 = 28;

/// Whole-dollar part of the unit price, `[25, 300)`.
const PRICE_DOLLARS: std::ops::Range<i64> = 25..300;

/// Cost discount in whole percent, `[5, 20)`.
const DISCOUNT_PERCENT: std::ops::Range<u32> = 5..20;

// =============================================================================
// Generator Configuration
// =============================================================================

/// Configuration for the sales generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of records to produce.
    #[serde(default = "default_record_count")]
    pub record_count: usize,

    /// Calendar year every sale falls in.
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_record_count() -> usize {
    DEFAULT_RECORD_COUNT
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            record_count: default_record_count(),
            year: default_year(),
        }
    }
}

impl GeneratorConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> SynthResult<()> {
        if self.record_count == 0 {
            return Err(SynthError::InvalidConfig(
                "record_count must be greater than 0".into(),
            ));
        }

        if !(1..=9999).contains(&self.year) {
            return Err(SynthError::InvalidConfig(format!(
                "year must be between 1 and 9999, got {}",
                self.year
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Sales Generator
// =============================================================================

/// Produces `record_count` sale records, one per call to [`Iterator::next`].
pub struct SalesGenerator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
    produced: usize,
}

impl SalesGenerator<ChaCha8Rng> {
    /// Creates a generator on a ChaCha8 stream seeded with `seed`.
    ///
    /// The same seed yields the same records on every platform.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> SynthResult<Self> {
        SalesGenerator::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SalesGenerator<R> {
    /// Creates a generator drawing from `rng`.
    pub fn new(config: GeneratorConfig, rng: R) -> SynthResult<Self> {
        config.validate()?;
        Ok(SalesGenerator {
            config,
            rng,
            produced: 0,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Records produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Produces every remaining record.
    pub fn generate(mut self) -> SynthResult<Vec<SaleRecord>> {
        debug!(
            count = self.config.record_count,
            year = self.config.year,
            "Generating sale records"
        );
        let records = self.by_ref().collect::<SynthResult<Vec<_>>>()?;
        debug!(count = records.len(), "Sale records generated");
        Ok(records)
    }

    /// Draws one record, regardless of the configured count.
    pub fn next_record(&mut self) -> SynthResult<SaleRecord> {
        let year = self.config.year;
        let month = self.rng.gen_range(1..=12);
        let day = self.rng.gen_range(1..=MAX_DAY);
        let date_sold = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(SynthError::InvalidDate { year, month, day })?;

        let department = Department::ALL[self.rng.gen_range(0..Department::ALL.len())];
        let product_id = ProductCode::random(department, &mut self.rng).to_string();

        let quantity_sold = self.rng.gen_range(1..=100);
        let unit_price = Money::from_major_minor(
            self.rng.gen_range(PRICE_DOLLARS),
            self.rng.gen_range(0..100),
        );
        let discount_bps = self.rng.gen_range(DISCOUNT_PERCENT) * 100;
        let base_cost = unit_price.apply_percentage_discount(discount_bps);

        let record = SaleRecord::new(
            date_sold,
            department,
            product_id,
            quantity_sold,
            unit_price,
            base_cost,
        )?;

        trace!(
            product_id = record.product_id(),
            date = %record.date_sold(),
            quantity = quantity_sold,
            unit_price = %unit_price,
            "Generated record"
        );

        self.produced += 1;
        Ok(record)
    }
}

impl<R: Rng> Iterator for SalesGenerator<R> {
    type Item = SynthResult<SaleRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.produced >= self.config.record_count {
            return None;
        }
        Some(self.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.config.record_count.saturating_sub(self.produced);
        (remaining, Some(remaining))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::mock::StepRng;
    use tally_core::Quarter;

    fn config(count: usize) -> GeneratorConfig {
        GeneratorConfig {
            record_count: count,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.record_count, 1000);
        assert_eq!(config.year, 2023);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(config(0).validate().is_err());
        assert!(GeneratorConfig { year: 0, ..config(1) }.validate().is_err());
        assert!(GeneratorConfig { year: 10_000, ..config(1) }.validate().is_err());
        assert!(matches!(
            SalesGenerator::seeded(config(0), 1),
            Err(SynthError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_generates_configured_count() {
        let generator = SalesGenerator::seeded(config(250), 9).unwrap();
        assert_eq!(generator.size_hint(), (250, Some(250)));
        let records = generator.generate().unwrap();
        assert_eq!(records.len(), 250);
    }

    #[test]
    fn test_fields_within_ranges() {
        let records = SalesGenerator::seeded(config(1000), 2024)
            .unwrap()
            .generate()
            .unwrap();

        for record in &records {
            assert_eq!(record.date_sold().year(), 2023);
            assert!((1..=MAX_DAY).contains(&record.date_sold().day()));
            assert!((1..=100).contains(&record.quantity_sold()));
            assert!(record.unit_price() >= Money::from_cents(2_500));
            assert!(record.unit_price() < Money::from_cents(30_000));

            // Cost sits 5%-19% below price, give or take the cent rounding
            let price = record.unit_price().cents();
            let cost = record.base_cost().cents();
            assert!(cost <= price);
            assert!(cost * 100 >= price * 81 - 100, "{price} / {cost}");
            assert!(cost * 100 <= price * 95 + 100, "{price} / {cost}");

            assert!(record.product_id().starts_with(record.department().abbreviation()));
        }
    }

    #[test]
    fn test_covers_every_quarter_and_department() {
        let records = SalesGenerator::seeded(config(1000), 5)
            .unwrap()
            .generate()
            .unwrap();

        for quarter in Quarter::ALL {
            assert!(records.iter().any(|r| r.quarter() == quarter), "{quarter}");
        }
        for department in Department::ALL {
            assert!(records.iter().any(|r| r.department() == department), "{department}");
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let a = SalesGenerator::seeded(config(50), 77).unwrap().generate().unwrap();
        let b = SalesGenerator::seeded(config(50), 77).unwrap().generate().unwrap();
        let c = SalesGenerator::seeded(config(50), 78).unwrap().generate().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_configured_year_is_used() {
        let records = SalesGenerator::seeded(
            GeneratorConfig {
                record_count: 20,
                year: 2024,
            },
            3,
        )
        .unwrap()
        .generate()
        .unwrap();
        assert!(records.iter().all(|r| r.date_sold().year() == 2024));
    }

    #[test]
    fn test_accepts_any_injected_rng() {
        let mut generator = SalesGenerator::new(config(3), StepRng::new(0, 1)).unwrap();
        let record = generator.next_record().unwrap();
        assert_eq!(generator.produced(), 1);
        assert!(record.quantity_sold() >= 1);
        assert_eq!(generator.count(), 2);
    }
}
