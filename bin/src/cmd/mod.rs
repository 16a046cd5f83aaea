//! CLI subcommand modules.
//!
//! This module contains the implementations for all ventas CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod list;
pub(crate) mod refresh;
pub(crate) mod remove;

use crate::config::Config;
use anyhow::Result;
use ventas::{
    Analyst,
    fmp::{FmpClient, FmpProvider},
    store::JsonFileStore,
};

/// The FMP-backed pipeline writing to the configured store.
pub(crate) fn fmp_analyst(config: &Config) -> Result<Analyst<FmpProvider, JsonFileStore>> {
    let provider = FmpProvider::new(FmpClient::new(config.require_api_key()?)?);
    Ok(Analyst::new(provider, open_store(config)))
}

/// The configured JSON store.
pub(crate) fn open_store(config: &Config) -> JsonFileStore {
    JsonFileStore::new(config.store_path.clone())
}
