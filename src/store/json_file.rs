//! JSON-file route store.
//!
//! Persists the whole collection as a single JSON array of route documents.
//! Upserts are read-modify-write: the current collection is loaded, the
//! matching entry replaced in place (or appended), and the file rewritten.
//! Suitable as a local stand-in for a remote document store; connection
//! setup for real backends is out of scope here.

use crate::catalog::{DocumentId, RouteDocument, RouteKey};
use crate::store::{RouteStore, StoreError};
use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable naming the collection file.
pub const STORE_PATH_ENV: &str = "ROUTEDOC_STORE_PATH";

#[derive(Debug)]
/// Route store backed by one JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Resolve the collection path from `ROUTEDOC_STORE_PATH`.
    ///
    /// The variable must name a file in an existing directory; the file
    /// itself is created on first upsert.
    pub fn from_env() -> Result<Self> {
        let raw = env::var(STORE_PATH_ENV)
            .with_context(|| format!("{STORE_PATH_ENV} must point at the route collection file"))?;
        let path = PathBuf::from(raw.trim());
        if path.as_os_str().is_empty() {
            bail!("{STORE_PATH_ENV} is set but empty");
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!(
                    "{STORE_PATH_ENV} parent directory does not exist: {}",
                    parent.display()
                );
            }
        }
        Ok(JsonFileStore::new(path))
    }

    fn read_collection(&self) -> Result<Vec<RouteDocument>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(StoreError::Io)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data).map_err(StoreError::Decode)
    }

    fn write_collection(&self, documents: &[RouteDocument]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(documents).map_err(StoreError::Decode)?;
        fs::write(&self.path, data).map_err(StoreError::Io)
    }
}

impl RouteStore for JsonFileStore {
    fn upsert(
        &mut self,
        key: &RouteKey,
        document: &RouteDocument,
    ) -> Result<DocumentId, StoreError> {
        let mut documents = self.read_collection()?;

        let existing = documents.iter().position(|doc| &doc.key() == key);
        let id = existing
            .and_then(|idx| documents[idx].id.clone())
            .unwrap_or_else(|| next_identity(&documents));

        let mut stored = document.clone();
        stored.id = Some(id.clone());
        match existing {
            Some(idx) => documents[idx] = stored,
            None => documents.push(stored),
        }

        self.write_collection(&documents)?;
        Ok(id)
    }

    fn fetch_all(&self) -> Result<Vec<RouteDocument>, StoreError> {
        self.read_collection()
    }
}

/// Next free identity, derived from the highest numeric suffix in use.
fn next_identity(documents: &[RouteDocument]) -> DocumentId {
    let highest = documents
        .iter()
        .filter_map(|doc| doc.id.as_ref())
        .filter_map(|id| id.0.strip_prefix("route-"))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    DocumentId(format!("route-{:06}", highest + 1))
}
