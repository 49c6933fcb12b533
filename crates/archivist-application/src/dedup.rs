// SPDX-License-Identifier: GPL-3.0-or-later

//! Duplicate resolution driver.
//!
//! A run is a single linear pass:
//! 1. Collecting: read a snapshot of the whole catalogue
//! 2. Grouping: partition it into candidate-duplicate groups
//! 3. Scoring: rank the members of every group
//! 4. Deciding: pick a survivor per group
//! 5. Reporting (dry run) or Applying (delete discarded records)
//!
//! Planning and applying are separate calls so a caller can show the plan
//! and ask for confirmation before anything is deleted.

use std::fmt;
use std::sync::Arc;

use archivist_domain::{RecordError, Report, ResolutionDecision, RunId, RunMode};
use archivist_infrastructure::CatalogueStore;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{DedupError, DedupResult};
use crate::grouping::GroupBuilder;
use crate::resolution::{decide, rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Collecting,
    Grouping,
    Scoring,
    Deciding,
    Reporting,
    Applying,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Collecting => "collecting",
            Self::Grouping => "grouping",
            Self::Scoring => "scoring",
            Self::Deciding => "deciding",
            Self::Reporting => "reporting",
            Self::Applying => "applying",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Decisions computed from one catalogue snapshot.
#[derive(Debug, Clone)]
pub struct ResolutionPlan {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub records_read: usize,
    pub decisions: Vec<ResolutionDecision>,
}

impl ResolutionPlan {
    pub fn total_discarded(&self) -> usize {
        self.decisions.iter().map(|d| d.discarded_ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

pub struct DeduplicationService {
    store: Arc<dyn CatalogueStore>,
    category: Option<String>,
}

impl DeduplicationService {
    pub fn new(store: Arc<dyn CatalogueStore>) -> Self {
        Self {
            store,
            category: None,
        }
    }

    /// Only resolve duplicates inside `category`.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Plan, then report or apply depending on `mode`.
    pub async fn run(&self, mode: RunMode) -> DedupResult<Report> {
        let plan = self.plan().await?;
        Ok(match mode {
            RunMode::DryRun => self.report(plan),
            RunMode::Apply => self.apply(plan).await,
        })
    }

    /// Read the catalogue and decide every group. Never mutates the store.
    pub async fn plan(&self) -> DedupResult<ResolutionPlan> {
        let run_id = RunId::new();
        let started_at = Utc::now();

        enter(run_id, RunPhase::Collecting);
        let records = self.store.fetch_all().await.map_err(|e| {
            warn!(target: "dedup", %run_id, error = %e, "catalogue read failed, aborting run");
            DedupError::StoreRead(e)
        })?;
        let records_read = records.len();

        enter(run_id, RunPhase::Grouping);
        let mut builder = match &self.category {
            Some(category) => GroupBuilder::for_category(category.clone()),
            None => GroupBuilder::new(),
        };
        builder.extend(records);
        let groups = builder.finish();

        enter(run_id, RunPhase::Scoring);
        let ranked: Vec<_> = groups.iter().map(rank).collect();

        enter(run_id, RunPhase::Deciding);
        let decisions: Vec<_> = ranked.iter().filter_map(decide).collect();

        for decision in &decisions {
            info!(
                target: "dedup",
                %run_id,
                key = %decision.key,
                members = decision.discarded_ids.len() + 1,
                survivor = %decision.survivor_id,
                survivor_score = decision.score_of(decision.survivor_id),
                "duplicate group resolved"
            );
        }

        info!(
            target: "dedup",
            %run_id,
            records = records_read,
            groups = decisions.len(),
            "resolution planned"
        );

        Ok(ResolutionPlan {
            run_id,
            started_at,
            records_read,
            decisions,
        })
    }

    /// Summarize a plan without touching the store.
    pub fn report(&self, plan: ResolutionPlan) -> Report {
        enter(plan.run_id, RunPhase::Reporting);
        let report = finish(plan, RunMode::DryRun, 0, Vec::new());
        enter(report.run_id, RunPhase::Done);
        report
    }

    /// Delete every discarded record of the plan. Each deletion stands on its
    /// own; failures are collected into the report and the run carries on.
    pub async fn apply(&self, plan: ResolutionPlan) -> Report {
        let run_id = plan.run_id;
        enter(run_id, RunPhase::Applying);

        let mut removed = 0;
        let mut errors = Vec::new();
        for decision in &plan.decisions {
            for &id in &decision.discarded_ids {
                if id == decision.survivor_id {
                    continue;
                }
                match self.store.delete(id).await {
                    Ok(()) => {
                        debug!(target: "dedup", %run_id, %id, key = %decision.key, "removed duplicate");
                        removed += 1;
                    }
                    Err(e) => {
                        warn!(
                            target: "dedup",
                            %run_id,
                            %id,
                            error = %e,
                            "failed to remove duplicate"
                        );
                        errors.push(RecordError {
                            id,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            target: "dedup",
            %run_id,
            groups = plan.decisions.len(),
            removed,
            failed = errors.len(),
            "resolution applied"
        );

        let report = finish(plan, RunMode::Apply, removed, errors);
        enter(run_id, RunPhase::Done);
        report
    }
}

fn enter(run_id: RunId, phase: RunPhase) {
    debug!(target: "dedup", %run_id, %phase, "entering phase");
}

fn finish(plan: ResolutionPlan, mode: RunMode, removed: usize, errors: Vec<RecordError>) -> Report {
    Report {
        run_id: plan.run_id,
        mode,
        started_at: plan.started_at,
        finished_at: Utc::now(),
        groups_considered: plan.decisions.len(),
        total_discarded: plan.total_discarded(),
        removed,
        decisions: plan.decisions,
        errors,
    }
}
