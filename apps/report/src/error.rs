//! # Report Error Type
//!
//! Unified error type for the report application.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  report.toml ──► toml::de::Error ──────────┐                           │
//! │  TALLY_* env ──► ReportError::Config ──────┤                           │
//! │  generator   ──► SynthError ───────────────┼──► ReportError ──► main   │
//! │  JSON output ──► serde_json::Error ────────┤                           │
//! │  stdout      ──► std::io::Error ───────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use tally_synth::SynthError;

/// Report application errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file could not be parsed.
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Report could not be serialized to JSON.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record generation failed.
    #[error(transparent)]
    Synth(#[from] SynthError),

    /// Reading config or writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
