//! # Quarterly Report Binary
//!
//! Prints a quarterly sales and profit report over freshly generated records.
//! Configure with `report.toml` or `TALLY_*` variables; see [`tally_report::config`].

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tally_report::init_tracing();
    tally_report::run()?;
    Ok(())
}
