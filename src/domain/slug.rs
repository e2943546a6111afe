//! Slug derivation for celebrity URLs.
//!
//! Uniqueness is negotiated by the catalog service against the store; this
//! module only knows how to turn a display name into the base slug and how
//! to spell the numbered candidates derived from it.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Derive the base slug for a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen and strips hyphens from both ends. A name made only of
/// punctuation produces an empty slug.
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Candidate slug for the given probe attempt.
///
/// Attempt 0 is the base slug itself; attempt `n` appends `-n`.
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}
