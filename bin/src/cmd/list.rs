//! List command implementation.

use crate::{cmd, config::Config, display};
use anyhow::{Result, bail};
use ventas::Watchlist;

/// Print one page of the ranked watchlist.
pub(crate) fn list_records(
    config: &Config,
    page: usize,
    page_size: usize,
    ticker: Option<&str>,
) -> Result<()> {
    let store = cmd::open_store(config);
    let mut watchlist = Watchlist::load(&store, page_size)?;

    display::print_header("Watchlist");

    if watchlist.is_empty() {
        println!("No valuations stored in {}.", config.store_path.display());
        println!("Run `ventas analyze <TICKER> --growth 10,10,10` to add one.\n");
        return Ok(());
    }

    match ticker {
        Some(t) => {
            if !watchlist.show(t) {
                bail!("{} is not in the watchlist", t.trim().to_uppercase());
            }
        }
        None => watchlist.go_to(page.saturating_sub(1)),
    }

    display::print_section(&format!(
        "RANKED BY UNDERVALUATION (page {} of {}, {} companies)",
        watchlist.page() + 1,
        watchlist.page_count(),
        watchlist.len()
    ));
    display::print_table(watchlist.page_records(), watchlist.first_rank());

    if watchlist.page() + 1 < watchlist.page_count() {
        println!("Use --page {} for more.\n", watchlist.page() + 2);
    }
    Ok(())
}
