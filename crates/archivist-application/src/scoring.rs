// SPDX-License-Identifier: GPL-3.0-or-later

//! Completeness scoring for catalogue records.
//!
//! The score is a linear sum over field presence. Free text (`notes`, `links`)
//! counts one point per hundred characters, a canonical `primary_link` is a
//! flat two points, and every other populated metadata field is one point.
//!
//! Scores are accumulated as whole hundredths of a point so that records the
//! weighting considers equal compare equal; [`score`] converts once at the end.

use archivist_domain::{CatalogueRecord, RecordFields};

/// Characters of free text worth one point; also the hundredths per point.
pub const TEXT_CHARS_PER_POINT: u64 = 100;
/// Points for having a canonical link.
pub const PRIMARY_LINK_POINTS: u64 = 2;
/// Points for each populated flat metadata field.
pub const FLAT_FIELD_POINTS: u64 = 1;

/// Information-richness score of a record. Always finite and non-negative.
pub fn score(record: &CatalogueRecord) -> f64 {
    to_points(score_hundredths(&record.fields))
}

pub fn score_fields(fields: &RecordFields) -> f64 {
    to_points(score_hundredths(fields))
}

/// Exact score in hundredths of a point, used for ranking.
pub fn score_hundredths(fields: &RecordFields) -> u64 {
    let mut total = text_chars(fields.notes.as_deref()) + text_chars(fields.links.as_deref());

    if is_present(fields.primary_link.as_deref()) {
        total += PRIMARY_LINK_POINTS * TEXT_CHARS_PER_POINT;
    }

    let flat = [
        &fields.quality,
        &fields.kind,
        &fields.available_length,
        &fields.leak_date,
        &fields.file_date,
        &fields.era,
    ];
    for value in flat {
        if is_present(value.as_deref()) {
            total += FLAT_FIELD_POINTS * TEXT_CHARS_PER_POINT;
        }
    }

    total
}

fn to_points(hundredths: u64) -> f64 {
    hundredths as f64 / TEXT_CHARS_PER_POINT as f64
}

fn text_chars(value: Option<&str>) -> u64 {
    value.map_or(0, |text| text.chars().count() as u64)
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_record_scores_zero() {
        assert_eq!(score(&CatalogueRecord::new(1, "Song")), 0.0);
        assert_eq!(score(&CatalogueRecord::untitled(2)), 0.0);
    }

    #[test]
    fn free_text_scores_per_hundred_chars() {
        let fields = RecordFields {
            notes: s("short"),
            links: Some("x".repeat(250)),
            ..Default::default()
        };
        assert!(close(score_fields(&fields), 0.05 + 2.5));
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        let fields = RecordFields {
            notes: s("ééééé"),
            ..Default::default()
        };
        assert!(close(score_fields(&fields), 0.05));
    }

    #[test]
    fn primary_link_is_flat_bonus() {
        let fields = RecordFields {
            primary_link: s("http://a"),
            ..Default::default()
        };
        assert!(close(score_fields(&fields), 2.0));
    }

    #[test]
    fn split_free_text_scores_the_same_as_one_field() {
        let notes_only = RecordFields {
            notes: Some("n".repeat(30)),
            ..Default::default()
        };
        let notes_and_links = RecordFields {
            notes: Some("n".repeat(10)),
            links: Some("l".repeat(20)),
            ..Default::default()
        };
        assert_eq!(score_hundredths(&notes_only), 30);
        assert_eq!(score_hundredths(&notes_and_links), 30);
        assert_eq!(score_fields(&notes_only), score_fields(&notes_and_links));
    }

    #[test]
    fn empty_strings_contribute_nothing() {
        let fields = RecordFields {
            notes: s(""),
            links: s(""),
            primary_link: s(""),
            quality: s(""),
            kind: s(""),
            available_length: s(""),
            leak_date: s(""),
            file_date: s(""),
            era: s(""),
        };
        assert_eq!(score_fields(&fields), 0.0);
    }

    #[test]
    fn scores_worked_example() {
        let sparse = CatalogueRecord::new(1, "Pull Up").with_fields(RecordFields {
            notes: s("short"),
            leak_date: s("2018"),
            ..Default::default()
        });
        assert!(close(score(&sparse), 1.05));

        let rich = CatalogueRecord::new(2, "Pull Up [V2] (prod. X)").with_fields(RecordFields {
            links: s("http://a"),
            primary_link: s("http://a"),
            quality: s("CDQ"),
            kind: s("Studio"),
            leak_date: s("2018"),
            file_date: s("2018"),
            era: s("Die Lit"),
            ..Default::default()
        });
        assert!(close(score(&rich), 0.08 + 2.0 + 5.0));
    }

    #[test]
    fn adding_fields_never_lowers_score() {
        let mut fields = RecordFields::default();
        let mut previous = score_fields(&fields);
        let setters: Vec<fn(&mut RecordFields)> = vec![
            |f: &mut RecordFields| f.notes = Some("notes".into()),
            |f: &mut RecordFields| f.links = Some("http://x".into()),
            |f: &mut RecordFields| f.primary_link = Some("http://x".into()),
            |f: &mut RecordFields| f.quality = Some("HQ".into()),
            |f: &mut RecordFields| f.kind = Some("Studio".into()),
            |f: &mut RecordFields| f.available_length = Some("Full".into()),
            |f: &mut RecordFields| f.leak_date = Some("2019".into()),
            |f: &mut RecordFields| f.file_date = Some("2018".into()),
            |f: &mut RecordFields| f.era = Some("Eternal Atake".into()),
        ];
        for set in setters {
            set(&mut fields);
            let current = score_fields(&fields);
            assert!(current > previous);
            previous = current;
        }
    }
}
