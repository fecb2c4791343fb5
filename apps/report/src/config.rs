//! # Report Configuration
//!
//! Configuration management for the quarterly report run.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_RECORD_COUNT=5000                                            │
//! │     TALLY_SEED=42                                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $TALLY_CONFIG, otherwise                                           │
//! │     ~/.config/tally-report/report.toml (Linux)                         │
//! │     ~/Library/Application Support/com.tally.report/report.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     1000 records, year 2023, fresh seed, text output                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [generator]
//! record_count = 1000
//! year = 2023
//! seed = 42          # omit for a fresh seed every run
//!
//! [output]
//! format = "text"    # text | json
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use tally_synth::GeneratorConfig;

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Output Format
// =============================================================================

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Boxed console tables.
    #[default]
    Text,

    /// A single pretty-printed JSON document.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReportError::Config(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Settings Sections
// =============================================================================

/// The `[generator]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Record count and year.
    #[serde(flatten)]
    pub config: GeneratorConfig,

    /// Seed for the record stream. `None` draws a fresh one per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete report configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$TALLY_CONFIG`, or the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("TALLY_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a `report.toml` document.
    pub fn from_toml_str(contents: &str) -> ReportResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        self.generator.config.validate()?;
        Ok(())
    }

    /// Applies `TALLY_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(count) = lookup("TALLY_RECORD_COUNT") {
            match count.parse::<usize>() {
                Ok(n) => {
                    debug!(record_count = n, "Overriding record count from environment");
                    self.generator.config.record_count = n;
                }
                Err(_) => warn!(value = %count, "Ignoring invalid TALLY_RECORD_COUNT"),
            }
        }

        if let Some(year) = lookup("TALLY_YEAR") {
            match year.parse::<i32>() {
                Ok(y) => self.generator.config.year = y,
                Err(_) => warn!(value = %year, "Ignoring invalid TALLY_YEAR"),
            }
        }

        if let Some(seed) = lookup("TALLY_SEED") {
            match seed.parse::<u64>() {
                Ok(s) => {
                    debug!(seed = s, "Overriding seed from environment");
                    self.generator.seed = Some(s);
                }
                Err(_) => warn!(value = %seed, "Ignoring invalid TALLY_SEED"),
            }
        }

        if let Some(format) = lookup("TALLY_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.output.format = parsed,
                Err(e) => warn!(error = %e, "Ignoring invalid TALLY_FORMAT"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "report")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}
