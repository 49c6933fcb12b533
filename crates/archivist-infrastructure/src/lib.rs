// SPDX-License-Identifier: GPL-3.0-or-later
pub mod error;
pub mod memory;
pub mod repositories;
pub mod sqlite_adapters;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCatalogueStore;
pub use repositories::CatalogueStore;
pub use sqlite_adapters::SqliteCatalogueStore;

use anyhow::Result;
use archivist_config::AppConfig;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// How a run is allowed to touch the catalogue database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueAccess {
    /// Dry runs: the file must exist and is opened read-only.
    ReadOnly,
    /// Apply runs: the file must exist unless migrations are enabled.
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenMode {
    ReadOnly,
    ReadWrite,
    Create,
}

impl OpenMode {
    fn as_query(self) -> &'static str {
        match self {
            Self::ReadOnly => "ro",
            Self::ReadWrite => "rw",
            Self::Create => "rwc",
        }
    }
}

/// Build the SQLite connection URL for file databases. Only `Create` makes
/// the parent directory and lets SQLite create a missing file.
fn database_url(url: &str, mode: OpenMode) -> Result<String> {
    if !url.starts_with("sqlite://") || url.starts_with("sqlite://:memory:") {
        return Ok(url.to_string());
    }

    let db_path = url.trim_start_matches("sqlite://");
    let path = Path::new(db_path);

    if mode == OpenMode::Create {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
                info!(target: "infrastructure", path = %parent.display(), "created database directory");
            }
        }
    }

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    // forward slashes work for SQLite on every platform
    let path_str = absolute_path.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite://{}?mode={}", path_str, mode.as_query()))
}

/// Connect to the catalogue database. Migrations only run for read-write
/// access with `database.migrate` enabled; otherwise the schema is left as
/// the catalogue site created it.
pub async fn open_catalogue(config: &AppConfig, access: CatalogueAccess) -> Result<SqlitePool> {
    let migrate = access == CatalogueAccess::ReadWrite && config.database.migrate;
    let mode = match access {
        CatalogueAccess::ReadOnly => OpenMode::ReadOnly,
        CatalogueAccess::ReadWrite if migrate => OpenMode::Create,
        CatalogueAccess::ReadWrite => OpenMode::ReadWrite,
    };

    let db_url = database_url(&config.database.url, mode)?;
    info!(target: "infrastructure", db_url = %db_url, ?access, "connecting to database");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.pool_max_size)
        .connect(&db_url)
        .await?;

    if migrate {
        info!(target: "infrastructure", db_url = %config.database.url, "running migrations");
        sqlx::migrate!("../../migrations").run(&pool).await?;
    }

    info!(target: "infrastructure", "database ready");
    Ok(pool)
}
