// ABOUTME: Pure cleanup functions applied to raw technique output before merging.
// ABOUTME: Covers whitespace normalization, relative URL rewriting, dedup, and provenance marking.

//! Cleanup stage.
//!
//! Every value a technique produces passes through here before it reaches the
//! merged result.
//!
//! Key behaviors:
//! - Text values have runs of whitespace (including newlines) collapsed to
//!   single spaces and are trimmed.
//! - URL values that are already absolute pass through unchanged; relative
//!   values are joined against the source URL when one was supplied.
//! - Protocol-relative values (`//host/path`) get an `http:` scheme, whether
//!   or not a source URL is available.
//! - Dedup keeps the first occurrence of each value, preserving order.

use std::collections::HashSet;

use url::Url;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrites a URL value to absolute form where possible.
///
/// Absolute URLs (anything with a scheme) are returned unchanged.
/// Protocol-relative URLs are given an `http:` scheme. Relative URLs are
/// resolved against `base` when present; with no base, or when the join
/// fails, the value passes through unchanged.
pub fn clean_url(value: &str, base: Option<&Url>) -> String {
    let value = value.trim();
    if let Some(rest) = value.strip_prefix("//") {
        return format!("http://{}", rest);
    }
    if Url::parse(value).is_ok() {
        return value.to_string();
    }
    let Some(base) = base else {
        return value.to_string();
    };
    match base.join(value) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Collapses a value list to first occurrences only, preserving order.
pub fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Prefixes a cleaned value with the technique that produced it.
///
/// Debug aid, off by default; see `ExtractorBuilder::mark_provenance`.
pub fn mark_provenance(technique: &str, value: &str) -> String {
    format!("({}) {}", technique, value)
}
