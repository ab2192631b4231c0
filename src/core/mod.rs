// src/core/mod.rs

// The `core` module holds everything that talks to the network or transforms
// its results. Front-ends (console report, dashboard) only consume `ScanEvent`s.

/// Data structures shared across the pipeline: certificate entries, probe
/// outcomes, scan events and counters.
pub mod models;

/// Typed errors for the lookup and for a whole scan.
pub mod error;

/// Client for the certificate transparency search service.
pub mod lookup;

/// Pure extraction of hostname-shaped candidates from certificate names.
pub mod extract;

/// HTTP and HTTPS reachability probes.
pub mod prober;

/// Drives lookup, extraction and probing in order.
pub mod runner;

use url::Url;

/// Reduces operator input to a bare target.
///
/// A URL such as `https://www.example.com/login` becomes its host. Input that
/// does not parse as a URL (a `%.example.com` pattern, for instance) is kept
/// as typed, minus surrounding whitespace.
pub fn normalize_target(raw: &str) -> String {
    let raw = raw.trim();
    let with_scheme = if !raw.starts_with("http://") && !raw.starts_with("https://") {
        format!("https://{}", raw)
    } else {
        raw.to_string()
    };
    Url::parse(&with_scheme)
        .ok()
        .and_then(|url| url.host_str().map(String::from))
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_target;

    #[test]
    fn urls_are_reduced_to_their_host() {
        assert_eq!(normalize_target("https://www.example.com/login?x=1"), "www.example.com");
        assert_eq!(normalize_target("http://example.com:8080"), "example.com");
        assert_eq!(normalize_target("  example.com "), "example.com");
    }

    #[test]
    fn patterns_are_kept_as_typed() {
        assert_eq!(normalize_target("%.example.com"), "%.example.com");
    }
}
