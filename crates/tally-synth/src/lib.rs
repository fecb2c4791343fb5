//! # tally-synth: Synthetic Sales Records
//!
//! Generates sale records with every field drawn inside its documented
//! range. The random number generator is injected, so tests and repeat runs
//! can pin a seed.
//!
//! ## Modules
//! - [`generator`] - `SalesGenerator` and its configuration
//! - [`product`] - Structured product codes
//! - [`error`] - Generator error types
//!
//! ## Example
//! ```rust
//! use tally_core::aggregate;
//! use tally_synth::{GeneratorConfig, SalesGenerator};
//!
//! let records = SalesGenerator::seeded(GeneratorConfig::default(), 2023)
//!     .unwrap()
//!     .generate()
//!     .unwrap();
//!
//! let report = aggregate(&records);
//! assert_eq!(report.record_count(), 1000);
//! ```

pub mod error;
pub mod generator;
pub mod product;

pub use error::{SynthError, SynthResult};
pub use generator::{GeneratorConfig, SalesGenerator, DEFAULT_RECORD_COUNT, DEFAULT_YEAR};
pub use product::ProductCode;
