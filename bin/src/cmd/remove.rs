//! Delete and clear command implementations.

use crate::{cmd, config::Config};
use anyhow::Result;
use tracing::info;
use ventas::{RecordStore, traits::normalize_ticker};

/// Remove one ticker from the store.
pub(crate) fn delete_record(config: &Config, ticker: &str) -> Result<()> {
    let mut store = cmd::open_store(config);
    let ticker = normalize_ticker(ticker);

    if store.delete(&ticker)? {
        println!("Deleted {ticker}.");
    } else {
        println!("{ticker} is not in the store; nothing to delete.");
    }
    Ok(())
}

/// Remove every record from the store.
pub(crate) fn clear_records(config: &Config) -> Result<()> {
    let mut store = cmd::open_store(config);
    let count = store.load_all()?.len();
    store.replace_all(Vec::new())?;
    info!(count, "Cleared store");
    println!("Cleared {count} record(s) from {}.", config.store_path.display());
    Ok(())
}
