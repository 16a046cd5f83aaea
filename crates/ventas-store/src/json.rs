//! JSON file record store.

use crate::{dedup_by_ticker, remove_from, upsert_into};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use ventas_traits::{RecordStore, Result, ValuationRecord, VentasError};

/// On-disk document format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    records: Vec<ValuationRecord>,
}

/// Record store persisted as one pretty-printed JSON document.
///
/// Every mutation reads the document, applies the change and rewrites the
/// whole file through a temporary sibling followed by a rename, so readers
/// never observe a half-written file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (lazily) a store at `path`. Nothing is created until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the JSON document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ventas.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<Vec<ValuationRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store file missing; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: StoreDocument = serde_json::from_str(&content)?;
        if document.version > FORMAT_VERSION {
            return Err(VentasError::Storage(format!(
                "{} uses format version {}, newest supported is {FORMAT_VERSION}",
                self.path.display(),
                document.version
            )));
        }
        Ok(dedup_by_ticker(document.records))
    }

    fn write(&self, records: Vec<ValuationRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let count = records.len();
        let document = StoreDocument {
            version: FORMAT_VERSION,
            records,
        };
        let content = serde_json::to_string_pretty(&document)?;

        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            VentasError::Storage(format!(
                "failed to replace {}: {e}",
                self.path.display()
            ))
        })?;

        info!(path = %self.path.display(), records = count, "Store written");
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<ValuationRecord>> {
        self.read()
    }

    fn upsert(&mut self, record: ValuationRecord) -> Result<()> {
        let mut records = self.read()?;
        upsert_into(&mut records, record);
        self.write(records)
    }

    fn delete(&mut self, ticker: &str) -> Result<bool> {
        let mut records = self.read()?;
        if !remove_from(&mut records, ticker) {
            return Ok(false);
        }
        self.write(records)?;
        Ok(true)
    }

    fn replace_all(&mut self, records: Vec<ValuationRecord>) -> Result<()> {
        self.write(dedup_by_ticker(records))
    }
}
