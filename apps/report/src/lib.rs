//! # Tally Report Library
//!
//! Wires the generator, the aggregation pass and the renderers into one run.
//!
//! ## Module Organization
//! ```text
//! tally_report/
//! ├── lib.rs      ◄─── You are here (tracing setup & run)
//! ├── config.rs   ◄─── report.toml + TALLY_* overrides
//! ├── render.rs   ◄─── Console tables and JSON
//! └── error.rs    ◄─── ReportError
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ ReportConfig │──►│ SalesGenerator │──►│  aggregate  │──►│ render_text  │
//! │    ::load    │   │   ::seeded     │   │ (one pass)  │   │ render_json  │
//! └──────────────┘   └────────────────┘   └─────────────┘   └──────┬───────┘
//!                                                                  ▼
//!                                                               stdout
//! ```
//!
//! Logs go to stderr so stdout carries only the report.

pub mod config;
pub mod error;
pub mod render;

use std::io::Write;
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use tally_core::{aggregate, QuarterlyReport};
use tally_synth::SalesGenerator;

use config::{OutputFormat, ReportConfig};
use error::ReportResult;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one report: load config, generate, aggregate, print.
pub fn run() -> ReportResult<()> {
    let config = ReportConfig::load(None)?;

    let run_id = Uuid::new_v4();
    let span = info_span!("report", %run_id);
    let _guard = span.enter();

    let seed = config.generator.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        record_count = config.generator.config.record_count,
        year = config.generator.config.year,
        format = %config.output.format,
        "Starting quarterly report"
    );

    let report = build_report(&config, seed)?;
    let output = render(&report, config.output.format)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes())?;
    handle.flush()?;

    info!("Report written");
    Ok(())
}

/// Generates the configured records from `seed` and aggregates them.
pub fn build_report(config: &ReportConfig, seed: u64) -> ReportResult<QuarterlyReport> {
    let records = SalesGenerator::seeded(config.generator.config.clone(), seed)?.generate()?;
    let report = aggregate(&records);
    info!(
        records = report.record_count(),
        quarters = report.quarters().count(),
        "Aggregation complete"
    );

    for quarter in report.quarters() {
        if let Some(totals) = report.quarter_totals(quarter) {
            info!(
                %quarter,
                sales = %totals.sales,
                profit = %totals.profit,
                "Quarter aggregated"
            );
        }
    }

    Ok(report)
}

/// Renders `report` in the requested format.
pub fn render(report: &QuarterlyReport, format: OutputFormat) -> ReportResult<String> {
    match format {
        OutputFormat::Text => Ok(render::render_text(report)),
        OutputFormat::Json => render::render_json(report),
    }
}
