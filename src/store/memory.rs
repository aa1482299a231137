//! In-memory route store.
//!
//! BTree-backed so iteration order is deterministic. Used by the test suite
//! and by embedders that only need the catalog-to-document pipeline without
//! persistence.

use crate::catalog::{DocumentId, RouteDocument, RouteKey};
use crate::store::{RouteStore, StoreError};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
/// Route store holding documents in process memory.
pub struct MemoryStore {
    documents: BTreeMap<RouteKey, RouteDocument>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the stored document for a key, if any.
    pub fn get(&self, key: &RouteKey) -> Option<&RouteDocument> {
        self.documents.get(key)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl RouteStore for MemoryStore {
    fn upsert(
        &mut self,
        key: &RouteKey,
        document: &RouteDocument,
    ) -> Result<DocumentId, StoreError> {
        let id = match self.documents.get(key).and_then(|existing| existing.id.clone()) {
            Some(existing) => existing,
            None => {
                self.next_id += 1;
                DocumentId(format!("route-{:06}", self.next_id))
            }
        };

        let mut stored = document.clone();
        stored.id = Some(id.clone());
        self.documents.insert(key.clone(), stored);
        Ok(id)
    }

    fn fetch_all(&self) -> Result<Vec<RouteDocument>, StoreError> {
        Ok(self.documents.values().cloned().collect())
    }
}
