//! Analyze command implementation.

use crate::{
    cmd,
    config::Config,
    display::{self, parse_growth, require_rates},
};
use anyhow::{Result, bail};
use ventas::{BatchFailure, GrowthAssumptions, RecordStore, Ticker};

/// Analyze `tickers`, store the records and print them.
pub(crate) async fn run_analyze(
    config: &Config,
    tickers: &[String],
    growth: Option<&str>,
    estimates: bool,
) -> Result<()> {
    let rates = growth.map(parse_growth).transpose()?.unwrap_or_default();
    if !estimates && rates.is_empty() {
        bail!("--growth is required unless --estimates is given");
    }

    let mut analyst = cmd::fmp_analyst(config)?;

    display::print_header("Valuation");
    println!("Tickers: {}", tickers.join(", "));
    println!("Store:   {}", config.store_path.display());
    println!();

    let report = if estimates {
        analyst.analyze_batch_with_estimates(tickers, &rates).await?
    } else {
        let growth = GrowthAssumptions::new(require_rates(&rates)?);
        let requests: Vec<(Ticker, GrowthAssumptions)> = tickers
            .iter()
            .map(|t| (t.clone(), growth.clone()))
            .collect();
        analyst.analyze_batch(&requests).await?
    };

    display::print_section("RESULTS");
    for ticker in &report.refreshed {
        if let Some(record) = analyst.store().get(ticker)? {
            display::print_record(&record);
        }
    }
    print_failures(&report.failed);

    if report.refreshed.is_empty() && !report.failed.is_empty() {
        bail!("no ticker could be analyzed");
    }
    Ok(())
}

/// Print per-ticker failures, if any.
pub(crate) fn print_failures(failed: &[BatchFailure]) {
    if failed.is_empty() {
        return;
    }
    println!("Failed:");
    for failure in failed {
        println!("  {:<8} {}", failure.ticker, failure.error);
    }
    println!();
}
