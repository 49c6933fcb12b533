// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented rendering of plans and reports.

use std::io::{self, Write};

use archivist_domain::{Disposition, Report, ResolutionDecision, RunMode};

pub fn write_decisions(out: &mut impl Write, decisions: &[ResolutionDecision]) -> io::Result<()> {
    for decision in decisions {
        writeln!(
            out,
            "Group {}: {} records",
            decision.key,
            decision.discarded_ids.len() + 1
        )?;
        for id in decision.ranked_ids() {
            let disposition = decision.disposition(id).unwrap_or(Disposition::Discard);
            let name = decision.names.get(&id).map(String::as_str).unwrap_or("");
            writeln!(
                out,
                "  {:<8} #{:<6} score {:>6.2}  {}",
                disposition.to_string(),
                id.to_string(),
                decision.score_of(id),
                name
            )?;
        }
        writeln!(out, "  -> keeping #{}", decision.survivor_id)?;
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, report: &Report) -> io::Result<()> {
    match report.mode {
        RunMode::DryRun => {
            writeln!(out, "Dry run: no changes made")?;
            writeln!(out, "Would fix {} duplicate groups", report.groups_considered)?;
            writeln!(out, "Would remove {} records", report.total_discarded)?;
        }
        RunMode::Apply => {
            writeln!(out, "Fixed {} duplicate groups", report.groups_considered)?;
            writeln!(out, "Removed {} records", report.removed)?;
        }
    }

    if !report.errors.is_empty() {
        writeln!(out, "Failed to remove {} records:", report.errors.len())?;
        for error in &report.errors {
            writeln!(out, "  #{}: {}", error.id, error.message)?;
        }
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archivist_domain::{GroupKey, RecordError, RecordId, RunId};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn report(mode: RunMode) -> Report {
        let mut scores = BTreeMap::new();
        scores.insert(RecordId(1), 1.05);
        scores.insert(RecordId(2), 7.08);
        let mut names = BTreeMap::new();
        names.insert(RecordId(1), "Pull Up".to_string());
        names.insert(RecordId(2), "Pull Up [V2] (prod. X)".to_string());
        Report {
            run_id: RunId::new(),
            mode,
            started_at: Utc::now(),
            finished_at: Utc::now(),
            groups_considered: 1,
            total_discarded: 1,
            removed: if mode == RunMode::Apply { 1 } else { 0 },
            decisions: vec![ResolutionDecision {
                key: GroupKey::new("pull up", "Unreleased"),
                survivor_id: RecordId(2),
                discarded_ids: vec![RecordId(1)],
                scores,
                names,
            }],
            errors: Vec::new(),
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn decisions_list_every_member_with_score() {
        let r = report(RunMode::DryRun);
        let text = render(|out| write_decisions(out, &r.decisions));
        assert!(text.contains("Group 'pull up' [Unreleased]: 2 records"));
        assert!(text.contains("keep     #2"));
        assert!(text.contains("discard  #1"));
        assert!(text.contains("7.08"));
        assert!(text.contains("1.05"));
        assert!(text.contains("-> keeping #2"));
        let keep = text.find("keep ").unwrap();
        let discard = text.find("discard").unwrap();
        assert!(keep < discard);
    }

    #[test]
    fn apply_summary_reports_counts_and_errors() {
        let mut r = report(RunMode::Apply);
        r.errors.push(RecordError {
            id: RecordId(4),
            message: "Record not found: 4".to_string(),
        });
        let text = render(|out| write_summary(out, &r));
        assert!(text.contains("Fixed 1 duplicate groups"));
        assert!(text.contains("Removed 1 records"));
        assert!(text.contains("#4: Record not found: 4"));
    }

    #[test]
    fn dry_run_summary_says_nothing_changed() {
        let text = render(|out| write_summary(out, &report(RunMode::DryRun)));
        assert!(text.contains("no changes made"));
        assert!(text.contains("Would remove 1 records"));
        assert!(!text.contains("Removed"));
    }

    #[test]
    fn json_report_is_machine_readable() {
        let text = render(|out| write_json(out, &report(RunMode::Apply)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["mode"], "apply");
        assert_eq!(value["decisions"][0]["survivor_id"], 2);
        assert_eq!(value["total_discarded"], 1);
    }
}
