// SPDX-License-Identifier: GPL-3.0-or-later

use archivist_infrastructure::StoreError;
use thiserror::Error;

pub type DedupResult<T> = std::result::Result<T, DedupError>;

/// Errors that abort a resolution run. Per-record delete failures are not
/// errors at this level; they are collected into the report.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error("Failed to read catalogue: {0}")]
    StoreRead(#[source] StoreError),
}
