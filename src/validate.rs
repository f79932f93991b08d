//! Input validation for CLI ergonomics.
//!
//! Provides O(1) validation sets and synonym maps so users can type
//! natural language for run statuses. Three-tier resolution:
//! exact match → synonym lookup → error with suggestion.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::error::{Error, Result};

// ── Valid value sets (O(1) lookups) ──────────────────────────

pub static VALID_STATUSES: LazyLock<HashSet<&str>> =
    LazyLock::new(|| ["in_progress", "complete"].into_iter().collect());

// ── Synonym maps (typo recovery) ─────────────────────────────

pub static STATUS_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("done", "complete"),
        ("completed", "complete"),
        ("finished", "complete"),
        ("closed", "complete"),
        ("wip", "in_progress"),
        ("running", "in_progress"),
        ("active", "in_progress"),
        ("started", "in_progress"),
        ("open", "in_progress"),
        ("inprogress", "in_progress"),
        ("in-progress", "in_progress"),
    ]
    .into_iter()
    .collect()
});

/// Validate that a required field has a non-empty value.
///
/// Whitespace-only input counts as empty. Returns the trimmed value.
///
/// # Errors
///
/// Returns [`Error::RequiredField`] if the value is empty after trimming.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::RequiredField { field });
    }
    Ok(trimmed.to_string())
}

/// Normalize a run status string via exact match or synonym lookup.
///
/// Returns the canonical status, or an error with the original input
/// and an optional suggestion.
pub fn normalize_status(input: &str) -> std::result::Result<String, (String, Option<String>)> {
    let lower = input.to_lowercase();

    // Tier 1: exact match
    if VALID_STATUSES.contains(lower.as_str()) {
        return Ok(lower);
    }

    // Tier 2: synonym lookup
    if let Some(&canonical) = STATUS_SYNONYMS.get(lower.as_str()) {
        return Ok(canonical.to_string());
    }

    // Tier 3: find closest suggestion
    let suggestion = find_closest_match(&lower, &VALID_STATUSES, &STATUS_SYNONYMS);
    Err((input.to_string(), suggestion))
}

/// Find the closest matching value across valid set and synonyms.
fn find_closest_match(
    input: &str,
    valid: &HashSet<&str>,
    synonyms: &HashMap<&str, &str>,
) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for &v in valid.iter().chain(synonyms.keys()) {
        let dist = levenshtein_distance(input, v);
        if dist <= 3 {
            if best.is_none() || dist < best.unwrap().1 {
                // For synonyms, show what it maps to
                if let Some(&canonical) = synonyms.get(v) {
                    best = Some((canonical, dist));
                } else {
                    best = Some((v, dist));
                }
            }
        }
    }

    best.map(|(v, _)| v.to_string())
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Use single-row optimization (O(min(m,n)) space)
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Find existing IDs similar to the searched ID.
///
/// Returns up to `max` suggestions with edit distance ≤ 3,
/// sorted by distance then alphabetically.
pub fn find_similar_ids(searched: &str, existing: &[String], max: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|id| (levenshtein_distance(searched, id), id.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, id)| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("name", "Run A").unwrap(), "Run A");
        assert_eq!(require_non_empty("name", "  padded  ").unwrap(), "padded");
        assert!(matches!(
            require_non_empty("name", ""),
            Err(Error::RequiredField { field: "name" })
        ));
        assert!(matches!(
            require_non_empty("name", "   "),
            Err(Error::RequiredField { field: "name" })
        ));
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("complete"), Ok("complete".to_string()));
        assert_eq!(normalize_status("done"), Ok("complete".to_string()));
        assert_eq!(normalize_status("wip"), Ok("in_progress".to_string()));
        assert_eq!(normalize_status("in-progress"), Ok("in_progress".to_string()));
        assert_eq!(normalize_status("COMPLETE"), Ok("complete".to_string()));
        assert!(normalize_status("nonsense").is_err());
    }

    #[test]
    fn test_normalize_status_suggests_close_match() {
        let err = normalize_status("complet").unwrap_err();
        assert_eq!(err.0, "complet");
        assert_eq!(err.1, Some("complete".to_string()));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_similar_ids() {
        let ids = vec![
            "run_a1b2".to_string(),
            "run_a1b3".to_string(),
            "run_xxxx".to_string(),
        ];
        let result = find_similar_ids("run_a1b1", &ids, 3);
        assert!(!result.is_empty());
        assert!(result.contains(&"run_a1b2".to_string()));
    }
}
