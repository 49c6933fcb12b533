// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Category assigned to records that carry none.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// ============================================================================
// Value Objects & IDs
// ============================================================================

/// Identifier assigned by the external catalogue. Ids grow monotonically, so a
/// lower id means an older record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    DryRun,
    Apply,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DryRun => write!(f, "dry-run"),
            Self::Apply => write!(f, "apply"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Keep,
    Discard,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Discard => write!(f, "discard"),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// Optional metadata that makes a record more or less complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub notes: Option<String>,
    pub links: Option<String>,
    pub primary_link: Option<String>,
    pub quality: Option<String>,
    /// Release kind ("Studio", "Snippet", ...).
    pub kind: Option<String>,
    pub available_length: Option<String>,
    pub leak_date: Option<String>,
    pub file_date: Option<String>,
    pub era: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueRecord {
    pub id: RecordId,
    pub display_name: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub fields: RecordFields,
}

impl CatalogueRecord {
    pub fn new(id: impl Into<RecordId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
            category: None,
            fields: RecordFields::default(),
        }
    }

    /// A record the catalogue returned without a title.
    pub fn untitled(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            category: None,
            fields: RecordFields::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_fields(mut self, fields: RecordFields) -> Self {
        self.fields = fields;
        self
    }

    /// Category used for grouping; missing or empty categories collapse to
    /// [`UNKNOWN_CATEGORY`].
    pub fn category_or_unknown(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => UNKNOWN_CATEGORY,
        }
    }
}

// ============================================================================
// Grouping & Resolution
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub name: String,
    pub category: String,
}

impl GroupKey {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' [{}]", self.name, self.category)
    }
}

/// Candidate duplicates sharing one key, in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionGroup {
    pub key: GroupKey,
    pub members: Vec<CatalogueRecord>,
}

impl ResolutionGroup {
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionDecision {
    pub key: GroupKey,
    pub survivor_id: RecordId,
    /// Losing members, best first.
    pub discarded_ids: Vec<RecordId>,
    pub scores: BTreeMap<RecordId, f64>,
    pub names: BTreeMap<RecordId, String>,
}

impl ResolutionDecision {
    pub fn disposition(&self, id: RecordId) -> Option<Disposition> {
        if id == self.survivor_id {
            Some(Disposition::Keep)
        } else if self.discarded_ids.contains(&id) {
            Some(Disposition::Discard)
        } else {
            None
        }
    }

    /// Survivor followed by discarded ids, i.e. rank order.
    pub fn ranked_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        std::iter::once(self.survivor_id).chain(self.discarded_ids.iter().copied())
    }

    pub fn score_of(&self, id: RecordId) -> f64 {
        self.scores.get(&id).copied().unwrap_or_default()
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    pub id: RecordId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub run_id: RunId,
    pub mode: RunMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub groups_considered: usize,
    pub total_discarded: usize,
    /// Deletions the store confirmed; always zero for dry runs.
    pub removed: usize,
    pub decisions: Vec<ResolutionDecision>,
    pub errors: Vec<RecordError>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
