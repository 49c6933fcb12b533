// SPDX-License-Identifier: GPL-3.0-or-later

//! Partition a catalogue into candidate-duplicate groups.
//!
//! Records are keyed by `(normalized title, category)`. Groups keep the
//! catalogue iteration order of their members and are emitted in the order
//! their key was first seen. Singletons are dropped.

use std::collections::HashMap;

use archivist_domain::{CatalogueRecord, GroupKey, ResolutionGroup};
use tracing::{debug, warn};

use crate::normalize::normalize_opt;

/// Grouping key for a record, or `None` when the record cannot be grouped
/// (no title, or a title that normalizes to nothing).
pub fn group_key(record: &CatalogueRecord) -> Option<GroupKey> {
    let name = normalize_opt(record.display_name.as_deref());
    if name.is_empty() {
        return None;
    }
    Some(GroupKey::new(name, record.category_or_unknown()))
}

/// Incremental group builder; records can be pushed as they are read.
#[derive(Debug, Default)]
pub struct GroupBuilder {
    category: Option<String>,
    index: HashMap<GroupKey, usize>,
    groups: Vec<ResolutionGroup>,
    skipped: usize,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only group records whose (normalized) category equals `category`.
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: CatalogueRecord) {
        if let Some(wanted) = &self.category {
            if record.category_or_unknown() != wanted {
                return;
            }
        }

        if record.display_name.is_none() {
            warn!(target: "grouping", id = %record.id, "record has no display name, skipping");
            self.skipped += 1;
            return;
        }

        let Some(key) = group_key(&record) else {
            debug!(target: "grouping", id = %record.id, "title normalizes to nothing, skipping");
            self.skipped += 1;
            return;
        };

        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].members.push(record),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                let mut group = ResolutionGroup::new(key);
                group.members.push(record);
                self.groups.push(group);
            }
        }
    }

    /// Records left out of every group so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Groups with at least two members, in first-seen key order.
    pub fn finish(self) -> Vec<ResolutionGroup> {
        let total = self.groups.len();
        let groups: Vec<_> = self
            .groups
            .into_iter()
            .filter(|group| group.len() > 1)
            .collect();
        debug!(
            target: "grouping",
            keys = total,
            duplicate_groups = groups.len(),
            skipped = self.skipped,
            "grouping complete"
        );
        groups
    }
}

impl Extend<CatalogueRecord> for GroupBuilder {
    fn extend<I: IntoIterator<Item = CatalogueRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

pub fn build_groups(records: impl IntoIterator<Item = CatalogueRecord>) -> Vec<ResolutionGroup> {
    let mut builder = GroupBuilder::new();
    builder.extend(records);
    builder.finish()
}
