// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process catalogue store, used by tests and dry runs over fixture data.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use archivist_domain::{CatalogueRecord, RecordId};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::repositories::CatalogueStore;

#[derive(Default)]
struct State {
    records: BTreeMap<RecordId, CatalogueRecord>,
    failing_deletes: BTreeSet<RecordId>,
    fail_reads: bool,
}

/// Catalogue held in an ordered map behind a mutex.
#[derive(Default)]
pub struct InMemoryCatalogueStore {
    state: Mutex<State>,
}

impl InMemoryCatalogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = CatalogueRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, record: CatalogueRecord) {
        self.lock().records.insert(record.id, record);
    }

    /// Make every later `delete(id)` fail with `StoreError::Unavailable`.
    pub fn fail_deletes_for(&self, id: RecordId) {
        self.lock().failing_deletes.insert(id);
    }

    /// Make every later `fetch_all` fail.
    pub fn fail_reads(&self) {
        self.lock().fail_reads = true;
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.lock().records.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!(target: "repository", "catalogue store mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait::async_trait]
impl CatalogueStore for InMemoryCatalogueStore {
    async fn fetch_all(&self) -> StoreResult<Vec<CatalogueRecord>> {
        let state = self.lock();
        if state.fail_reads {
            return Err(StoreError::Unavailable("catalogue is offline".to_string()));
        }
        debug!(target: "repository", count = state.records.len(), "fetching all records");
        Ok(state.records.values().cloned().collect())
    }

    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        let mut state = self.lock();
        if state.failing_deletes.contains(&id) {
            return Err(StoreError::Unavailable(format!("record {id} is locked")));
        }
        debug!(target: "repository", %id, "deleting record");
        state
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
