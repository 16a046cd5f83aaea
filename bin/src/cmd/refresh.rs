//! Refresh command implementation.

use crate::{cmd, cmd::analyze::print_failures, config::Config, display};
use anyhow::Result;

/// Re-analyze every stored ticker and print the outcome.
pub(crate) async fn refresh_records(config: &Config) -> Result<()> {
    let mut analyst = cmd::fmp_analyst(config)?;

    display::print_header("Refresh");
    println!("Store: {}\n", config.store_path.display());

    let report = analyst.refresh_all().await?;
    if report.total() == 0 {
        println!("Nothing to refresh.\n");
        return Ok(());
    }

    display::print_section("SUMMARY");
    println!("Refreshed: {}", report.refreshed.len());
    println!("Failed:    {}\n", report.failed.len());
    print_failures(&report.failed);

    if report.is_complete() {
        println!("All {} records are up to date.\n", report.total());
    }
    Ok(())
}
