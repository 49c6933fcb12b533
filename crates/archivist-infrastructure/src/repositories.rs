// SPDX-License-Identifier: GPL-3.0-or-later
use archivist_domain::{CatalogueRecord, RecordId};

use crate::error::StoreResult;

// ============================================================================
// Repository Traits
// ============================================================================

/// Boundary to the externally managed catalogue table.
///
/// Resolution runs only ever read a full snapshot and delete single records;
/// records are never created or updated from this side.
#[async_trait::async_trait]
pub trait CatalogueStore: Send + Sync {
    /// Read-only snapshot of every record, ordered by id.
    async fn fetch_all(&self) -> StoreResult<Vec<CatalogueRecord>>;

    /// Delete one record. Fails with `StoreError::NotFound` when the id is
    /// not present.
    async fn delete(&self, id: RecordId) -> StoreResult<()>;
}
