//! Error types for record generation.

use thiserror::Error;

use tally_core::CoreError;

/// Record generation errors.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Generator configuration is invalid.
    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    /// Drawn date does not exist in the calendar.
    #[error("Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// A drawn record failed validation.
    #[error("Generated record rejected: {0}")]
    Record(#[from] CoreError),
}

/// Convenience type alias for Results with SynthError.
pub type SynthResult<T> = Result<T, SynthError>;
