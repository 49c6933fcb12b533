// SPDX-License-Identifier: GPL-3.0-or-later

//! Title normalization for duplicate detection.
//!
//! Duplicates of the same song usually differ only in trailing annotations:
//! version tags such as `[V2]` and credits such as `(prod. X)` or
//! `(feat. Y)`. The comparison key is the lower-cased title up to the first
//! `[` or `(`, trimmed.

/// Reduce a display title to its comparison key.
pub fn normalize(display_name: &str) -> String {
    let lowered = display_name.to_lowercase();
    let cut = lowered
        .find(|c: char| c == '[' || c == '(')
        .unwrap_or(lowered.len());
    lowered[..cut].trim().to_string()
}

/// Like [`normalize`], treating a missing title as empty.
pub fn normalize_opt(display_name: Option<&str>) -> String {
    display_name.map(normalize).unwrap_or_default()
}
