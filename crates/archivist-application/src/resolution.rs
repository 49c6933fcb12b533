// SPDX-License-Identifier: GPL-3.0-or-later

//! Survivor selection for a group of candidate duplicates.
//!
//! Members are ranked by completeness score, highest first. Equal scores
//! prefer the lower id, i.e. the older record, so the outcome never depends
//! on the order the store returned rows in.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use archivist_domain::{CatalogueRecord, GroupKey, ResolutionDecision, ResolutionGroup};

use crate::scoring::{score, score_hundredths};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: CatalogueRecord,
    /// Exact ranking key, in hundredths of a point.
    pub hundredths: u64,
    pub score: f64,
}

/// A group whose members carry scores, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGroup {
    pub key: GroupKey,
    pub members: Vec<ScoredRecord>,
}

fn rank_order(a: &ScoredRecord, b: &ScoredRecord) -> Ordering {
    b.hundredths
        .cmp(&a.hundredths)
        .then_with(|| a.record.id.cmp(&b.record.id))
}

/// Score every member and sort them into survivor-first order.
pub fn rank(group: &ResolutionGroup) -> RankedGroup {
    let mut members: Vec<ScoredRecord> = group
        .members
        .iter()
        .map(|record| ScoredRecord {
            hundredths: score_hundredths(&record.fields),
            score: score(record),
            record: record.clone(),
        })
        .collect();
    members.sort_by(rank_order);
    RankedGroup {
        key: group.key.clone(),
        members,
    }
}

/// Turn a ranked group into a decision. `None` for an empty group.
pub fn decide(ranked: &RankedGroup) -> Option<ResolutionDecision> {
    let (survivor, rest) = ranked.members.split_first()?;

    let mut scores = BTreeMap::new();
    let mut names = BTreeMap::new();
    for member in &ranked.members {
        scores.insert(member.record.id, member.score);
        if let Some(name) = &member.record.display_name {
            names.insert(member.record.id, name.clone());
        }
    }

    Some(ResolutionDecision {
        key: ranked.key.clone(),
        survivor_id: survivor.record.id,
        discarded_ids: rest.iter().map(|m| m.record.id).collect(),
        scores,
        names,
    })
}

/// Rank and decide in one step. Pure; nothing is deleted here.
pub fn resolve(group: &ResolutionGroup) -> Option<ResolutionDecision> {
    decide(&rank(group))
}
