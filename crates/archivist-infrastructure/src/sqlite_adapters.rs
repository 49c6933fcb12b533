// SPDX-License-Identifier: GPL-3.0-or-later
use archivist_domain::{CatalogueRecord, RecordFields, RecordId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repositories::CatalogueStore;

/// SQLx-backed catalogue store
pub struct SqliteCatalogueStore {
    pool: SqlitePool,
}

impl SqliteCatalogueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogueStore for SqliteCatalogueStore {
    async fn fetch_all(&self) -> StoreResult<Vec<CatalogueRecord>> {
        debug!(target: "repository", "fetching all catalogue records");
        let rows = sqlx::query("SELECT * FROM catalogue_records ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            out.push(row_to_record(&r)?);
        }
        debug!(target: "repository", count = out.len(), "fetched catalogue records");
        Ok(out)
    }

    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        debug!(target: "repository", %id, "deleting catalogue record");
        let result = sqlx::query("DELETE FROM catalogue_records WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

fn row_to_record(r: &SqliteRow) -> StoreResult<CatalogueRecord> {
    let id: i64 = r.try_get("id")?;
    Ok(CatalogueRecord {
        id: RecordId(id),
        display_name: r.try_get("name")?,
        category: r.try_get("category")?,
        fields: RecordFields {
            notes: r.try_get("notes")?,
            links: r.try_get("links")?,
            primary_link: r.try_get("primary_link")?,
            quality: r.try_get("quality")?,
            kind: r.try_get("type")?,
            available_length: r.try_get("available_length")?,
            leak_date: r.try_get("leak_date")?,
            file_date: r.try_get("file_date")?,
            era: r.try_get("era")?,
        },
    })
}

/// Insert a record as the catalogue site would, to seed test fixtures.
#[cfg(test)]
pub(crate) async fn insert_record(pool: &SqlitePool, record: &CatalogueRecord) -> StoreResult<()> {
    let q = r#"
        INSERT INTO catalogue_records (
            id, name, category, notes, links, primary_link, quality, type,
            available_length, leak_date, file_date, era
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    "#;
    let f = &record.fields;
    sqlx::query(q)
        .bind(record.id.value())
        .bind(record.display_name.clone())
        .bind(record.category.clone())
        .bind(f.notes.clone())
        .bind(f.links.clone())
        .bind(f.primary_link.clone())
        .bind(f.quality.clone())
        .bind(f.kind.clone())
        .bind(f.available_length.clone())
        .bind(f.leak_date.clone())
        .bind(f.file_date.clone())
        .bind(f.era.clone())
        .execute(pool)
        .await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
