//! Acronym-aware text matching.
//!
//! A run of two or more uppercase ASCII letters in a query ("AI", "RNA") must
//! appear with identical casing in the target. The rest of the query matches
//! case-insensitively. This keeps `AI` from matching every "ai" in prose.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::normalize::collapse_whitespace;

lazy_static! {
    static ref UPPERCASE_RUN: Regex = Regex::new(r"[A-Z]{2,}").unwrap();
}

/// Upper bound on the compiled size of an acronym pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A maximal run of uppercase letters within a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UppercaseSegment {
    pub segment: String,
    /// Byte offset of the first letter
    pub start: usize,
    /// Byte offset one past the last letter
    pub end: usize,
}

/// Whether `text` contains two or more consecutive uppercase ASCII letters.
pub fn has_consecutive_uppercase(text: &str) -> bool {
    UPPERCASE_RUN.is_match(text)
}

/// All maximal uppercase runs of length two or more, left to right.
pub fn extract_uppercase_segments(text: &str) -> Vec<UppercaseSegment> {
    UPPERCASE_RUN
        .find_iter(text)
        .map(|m| UppercaseSegment {
            segment: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Match `query` against `target` under the acronym rule.
///
/// Whitespace in both strings is collapsed first. An empty query matches
/// anything; a non-empty query never matches an empty target.
pub fn match_with_uppercase_sensitivity(query: &str, target: &str) -> bool {
    match_with_limit(query, target, PATTERN_SIZE_LIMIT)
}

fn match_with_limit(query: &str, target: &str, size_limit: usize) -> bool {
    let query = collapse_whitespace(query);
    let target = collapse_whitespace(target);

    if query.is_empty() {
        return true;
    }
    if target.is_empty() {
        return false;
    }

    let segments = extract_uppercase_segments(&query);
    if segments.is_empty() {
        return contains_ignore_case(&target, &query);
    }

    if segments.iter().any(|s| !target.contains(&s.segment)) {
        return false;
    }

    match compile_pattern(&query, &segments, size_limit) {
        Ok(pattern) => pattern.is_match(&target),
        Err(err) => {
            tracing::debug!(query = %query, error = %err, "acronym pattern rejected, using substring match");
            contains_ignore_case(&target, &query)
        }
    }
}

/// Build a pattern where the uppercase segments are case-sensitive literals
/// and the text around them matches case-insensitively.
fn compile_pattern(
    query: &str,
    segments: &[UppercaseSegment],
    size_limit: usize,
) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(query.len() * 2);
    let mut cursor = 0;

    for seg in segments {
        pattern.push_str(&regex::escape(&query[cursor..seg.start]));
        pattern.push_str("(?-i:");
        pattern.push_str(&regex::escape(&seg.segment));
        pattern.push(')');
        cursor = seg.end;
    }
    pattern.push_str(&regex::escape(&query[cursor..]));

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
