// SPDX-License-Identifier: GPL-3.0-or-later
pub mod dedup;
pub mod error;
pub mod grouping;
pub mod normalize;
pub mod resolution;
pub mod scoring;

pub use dedup::{DeduplicationService, ResolutionPlan, RunPhase};
pub use error::{DedupError, DedupResult};
pub use grouping::{build_groups, group_key, GroupBuilder};
pub use normalize::{normalize, normalize_opt};
pub use resolution::{decide, rank, resolve, RankedGroup, ScoredRecord};
pub use scoring::score;

use std::sync::Arc;

use archivist_config::AppConfig;
use archivist_infrastructure::CatalogueStore;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn on_start(&self) {
        info!(target: "application", "application state initialized");
    }

    /// Deduplication service over `store`, scoped by the configured category.
    pub fn dedup_service(&self, store: Arc<dyn CatalogueStore>) -> DeduplicationService {
        DeduplicationService::new(store).with_category(self.config.dedup.category.clone())
    }
}
