//! Store adapter contract for route documents.
//!
//! The catalog only needs key-based upsert and full-scan semantics from its
//! store. Keys are the `(service, path, method)` triple and the store assigns
//! a [`DocumentId`] on first insert that stays stable across later upserts of
//! the same key. Connection setup for remote backends (TLS, auth) is the
//! caller's responsibility and happens before a store value reaches the
//! catalog.

use crate::catalog::{DocumentId, RouteDocument, RouteKey};
use std::fmt;
use std::io;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Key-based put/get contract the catalog uploads through.
pub trait RouteStore {
    /// Insert or replace the document stored under `key`.
    ///
    /// Returns the store-assigned identity: a fresh one on first insert, the
    /// existing one when the key is already present.
    fn upsert(
        &mut self,
        key: &RouteKey,
        document: &RouteDocument,
    ) -> Result<DocumentId, StoreError>;

    /// Fetch every stored document.
    ///
    /// A decode failure aborts the whole batch read; no partially decoded
    /// result is returned.
    fn fetch_all(&self) -> Result<Vec<RouteDocument>, StoreError>;
}

#[derive(Debug)]
/// Failures surfaced by store adapters.
///
/// Only `Unavailable` is transient; the upload path retries those and
/// propagates everything else unchanged.
pub enum StoreError {
    /// The backend could not be reached right now; retrying may succeed.
    Unavailable(String),
    /// The backend refused the operation; retrying will not help.
    Rejected(String),
    Io(io::Error),
    Decode(serde_json::Error),
}

impl StoreError {
    /// True for failures worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
            StoreError::Rejected(reason) => write!(f, "store rejected operation: {reason}"),
            StoreError::Io(err) => write!(f, "store I/O failure: {err}"),
            StoreError::Decode(err) => write!(f, "unable to decode stored document: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable(_) | StoreError::Rejected(_) => None,
            StoreError::Io(err) => Some(err),
            StoreError::Decode(err) => Some(err),
        }
    }
}
