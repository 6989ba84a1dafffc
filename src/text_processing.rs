//! # Text Processing Module
//!
//! Deterministic canonicalization of freeform ingredient text. Every query
//! and every catalog name goes through [`normalize`] before comparison, so
//! "  Olive   OIL " and "olive oil" are the same ingredient.
//!
//! ## Rules
//!
//! - Lowercase the whole input
//! - Strip leading and trailing whitespace
//! - Collapse every internal run of whitespace (spaces, tabs, newlines) to one space
//!
//! The function is idempotent: `normalize(normalize(x)) == normalize(x)`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("Invalid whitespace regex pattern");
}

/// Canonicalize ingredient text.
///
/// Empty or whitespace-only input yields the empty string, which is never a
/// valid query.
///
/// # Examples
/// ```
/// use dishcovery::text_processing::normalize;
///
/// assert_eq!(normalize("  Olive   OIL "), "olive oil");
/// assert_eq!(normalize("\tsoy\nsauce"), "soy sauce");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    WHITESPACE_RUN
        .replace_all(lowered.trim(), " ")
        .into_owned()
}

/// Whether `text` is already in normalized form.
pub fn is_normalized(text: &str) -> bool {
    normalize(text) == text
}
