//! Catalogue fixtures shared by the integration tests.

use archivist_domain::{CatalogueRecord, RecordFields};

pub fn field(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// A small catalogue with two duplicate groups, one near-miss and one
/// untitled row.
pub fn catalogue() -> Vec<CatalogueRecord> {
    vec![
        CatalogueRecord::new(1, "Pull Up")
            .with_category("Unreleased")
            .with_fields(RecordFields {
                notes: field("short"),
                leak_date: field("2018"),
                ..Default::default()
            }),
        CatalogueRecord::new(2, "Pull Up [V2] (prod. X)")
            .with_category("Unreleased")
            .with_fields(RecordFields {
                links: field("http://a"),
                primary_link: field("http://a"),
                quality: field("CDQ"),
                kind: field("Studio"),
                leak_date: field("2018"),
                file_date: field("2018"),
                era: field("Die Lit"),
                ..Default::default()
            }),
        CatalogueRecord::new(3, "Pull Up").with_category("Released"),
        CatalogueRecord::new(5, "Homecoming").with_category("Unreleased"),
        CatalogueRecord::new(9, "Homecoming [V2]").with_category("Unreleased"),
        CatalogueRecord::new(11, "Homecoming (feat. Someone)")
            .with_category("Unreleased")
            .with_fields(RecordFields {
                kind: field(""),
                ..Default::default()
            }),
        CatalogueRecord::untitled(12).with_category("Unreleased"),
        CatalogueRecord::untitled(13).with_category("Unreleased"),
    ]
}
