// src/core/extract.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Loose hostname shape: letters, digits, dots and hyphens ending in a dot and
/// at least two letters. It is a text scan, not a hostname parser, and will
/// happily match hostname-looking fragments of unrelated text.
static RE_HOSTNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// Joins `values` with newlines and returns every hostname-shaped match,
/// duplicates collapsed.
pub fn extract_names<S: AsRef<str>>(values: &[S]) -> HashSet<String> {
    let combined = values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");

    RE_HOSTNAME
        .find_iter(&combined)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Strips the leading dots left over from wildcard names (`*.example.com`
/// matches as `.example.com`).
pub fn normalize_candidate(name: &str) -> &str {
    name.trim_start_matches('.')
}

/// The names to probe: extracted, normalized, deduplicated and sorted.
pub fn candidate_names<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    let raw = extract_names(values);
    let candidates: BTreeSet<String> = raw
        .iter()
        .map(|name| normalize_candidate(name).to_string())
        .collect();
    debug!(matches = raw.len(), candidates = candidates.len(), "Extracted candidate names.");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicates_across_values() {
        let values = ["a.example.com\nb.example.com", "a.example.com"];
        let names = extract_names(&values);
        let expected: HashSet<String> =
            ["a.example.com", "b.example.com"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names.len(), 2);
        assert_eq!(names, expected);
    }

    #[test]
    fn wildcard_entries_keep_their_dot_until_normalized() {
        let names = extract_names(&["*.wild.example.com"]);
        assert!(names.contains(".wild.example.com"));
        assert_eq!(normalize_candidate(".wild.example.com"), "wild.example.com");
        assert_eq!(normalize_candidate("..x.example.com"), "x.example.com");
        assert_eq!(normalize_candidate("x.example.com"), "x.example.com");
    }

    #[test]
    fn candidates_merge_wildcard_and_plain_forms() {
        let values = ["*.example.com\nexample.com", "www.example.com"];
        let candidates: Vec<String> = candidate_names(&values).into_iter().collect();
        assert_eq!(candidates, vec!["example.com", "www.example.com"]);
    }

    #[test]
    fn scan_is_permissive() {
        let names = extract_names(&["CN=mail.example.org, O=Example Corp. Ltd"]);
        assert_eq!(names.len(), 1);
        assert!(names.contains("mail.example.org"));

        // Not hostnames, but they have the shape of one.
        let noise = extract_names(&["see release-notes.txt and v1.2.3-beta.rc"]);
        assert!(noise.contains("release-notes.txt"));
        assert!(noise.contains("v1.2.3-beta.rc"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let values: [&str; 0] = [];
        assert!(extract_names(&values).is_empty());
        assert!(candidate_names(&["no hostnames here"]).is_empty());
    }
}
