// SPDX-License-Identifier: GPL-3.0-or-later

use archivist_domain::RecordId;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
