// src/core/models.rs

use serde::Deserialize;
use std::fmt;

// --- Lookup Models ---

/// One record of a `crt.sh` JSON response.
///
/// Only `name_value` matters here. It is free text and may hold several
/// newline-separated hostnames, wildcards, or names repeated across issuances.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateEntry {
    pub name_value: String,
}

/// Query flags for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Prepend `%.` to the domain unless it already carries a `%` marker.
    pub wildcard: bool,
    /// Include expired certificates. When false, `exclude=expired` is sent.
    pub expired: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            wildcard: true,
            expired: true,
        }
    }
}

// --- Probe Models ---

/// Outcome of a single GET against a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The server answered with a code below 400.
    Ok(u16),
    /// The server answered, but with a code of 400 or above.
    Failed(u16),
    /// The request never produced a response (refused, timeout, DNS, TLS...).
    Unreachable,
}

impl ProbeStatus {
    pub fn from_code(code: u16) -> Self {
        if code < 400 {
            ProbeStatus::Ok(code)
        } else {
            ProbeStatus::Failed(code)
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ProbeStatus::Unreachable)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProbeStatus::Failed(_))
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Ok(code) => write!(f, "{}", code),
            ProbeStatus::Failed(code) => write!(f, "{} (Request Failed)", code),
            ProbeStatus::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// HTTP and HTTPS outcomes for one candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub name: String,
    pub http: ProbeStatus,
    pub https: ProbeStatus,
}

impl ProbeResult {
    pub fn has_failure(&self) -> bool {
        self.http.is_failed() || self.https.is_failed()
    }
}

// --- Scan Progress ---

/// Progress notifications emitted while a scan runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A line meant for the operator, e.g. an unparseable lookup body.
    Diagnostic(String),
    /// Extraction finished with this many unique candidates.
    CandidatesFound(usize),
    /// A candidate answered and belongs in the report.
    Probed(ProbeResult),
    /// A candidate was left out of the report.
    Dropped(String),
}

/// Counters for one finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub candidates: usize,
    pub reported: usize,
    pub failed_status: usize,
    pub dropped: usize,
}

impl ScanSummary {
    pub fn probed(&self) -> usize {
        self.reported + self.dropped
    }

    /// Folds one event into the counters.
    pub fn record(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::CandidatesFound(n) => self.candidates = *n,
            ScanEvent::Probed(result) => {
                self.reported += 1;
                if result.has_failure() {
                    self.failed_status += 1;
                }
            }
            ScanEvent::Dropped(_) => self.dropped += 1,
            ScanEvent::Diagnostic(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_column_text() {
        assert_eq!(ProbeStatus::from_code(200).to_string(), "200");
        assert_eq!(ProbeStatus::from_code(301).to_string(), "301");
        assert_eq!(ProbeStatus::from_code(403).to_string(), "403 (Request Failed)");
        assert_eq!(ProbeStatus::from_code(503).to_string(), "503 (Request Failed)");
        assert_eq!(ProbeStatus::Unreachable.to_string(), "unreachable");
    }

    #[test]
    fn summary_counts_events() {
        let mut summary = ScanSummary::default();
        summary.record(&ScanEvent::CandidatesFound(3));
        summary.record(&ScanEvent::Probed(ProbeResult {
            name: "a.example.com".into(),
            http: ProbeStatus::Ok(200),
            https: ProbeStatus::Failed(403),
        }));
        summary.record(&ScanEvent::Probed(ProbeResult {
            name: "b.example.com".into(),
            http: ProbeStatus::Ok(200),
            https: ProbeStatus::Ok(200),
        }));
        summary.record(&ScanEvent::Dropped("c.example.com".into()));

        assert_eq!(summary.candidates, 3);
        assert_eq!(summary.reported, 2);
        assert_eq!(summary.failed_status, 1);
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.probed(), 3);
    }
}
