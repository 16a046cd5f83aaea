//! Environment configuration for the CLI.

use anyhow::{Result, anyhow};
use std::{env, path::PathBuf};

/// Store path used when neither `--store` nor `VENTAS_STORE` is given.
pub(crate) const DEFAULT_STORE_PATH: &str = "ventas.json";

/// Log filter used when neither `VENTAS_LOG` nor `RUST_LOG` is set.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI settings resolved from flags, the environment and `.env`.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) api_key: Option<String>,
    pub(crate) store_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub(crate) fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("FMP_API_KEY"),
            store_path: non_empty("VENTAS_STORE")
                .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
            log_filter: non_empty("VENTAS_LOG")
                .or_else(|| non_empty("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Apply a `--store` override.
    pub(crate) fn with_store(mut self, store: Option<PathBuf>) -> Self {
        if let Some(path) = store {
            self.store_path = path;
        }
        self
    }

    /// The FMP API key, required by commands that fetch.
    pub(crate) fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("FMP_API_KEY environment variable required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert!(config.api_key.is_none());
        assert!(config.require_api_key().is_err());
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_environment_values() {
        let config = config(&[
            ("FMP_API_KEY", "secret"),
            ("VENTAS_STORE", "/tmp/records.json"),
            ("RUST_LOG", "info"),
        ]);
        assert_eq!(config.require_api_key().unwrap(), "secret");
        assert_eq!(config.store_path, PathBuf::from("/tmp/records.json"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_ventas_log_wins_and_blank_is_unset() {
        let config = config(&[
            ("VENTAS_LOG", "debug"),
            ("RUST_LOG", "info"),
            ("FMP_API_KEY", "  "),
        ]);
        assert_eq!(config.log_filter, "debug");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_store_flag_overrides() {
        let config = config(&[("VENTAS_STORE", "env.json")]);
        let config = config.with_store(Some(PathBuf::from("flag.json")));
        assert_eq!(config.store_path, PathBuf::from("flag.json"));
        let config = config.with_store(None);
        assert_eq!(config.store_path, PathBuf::from("flag.json"));
    }
}
