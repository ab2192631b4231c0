// src/report.rs

use crate::core::models::{ProbeResult, ScanEvent};
use crate::core::runner::ScanSink;
use std::io::Write;
use tracing::warn;

pub const HEADER: &str = "Domain Name\t\tHTTP Status Code\t\tHTTPS Status Code";
pub const RULE: &str = "-------------------------------------------------------------";

pub fn format_row(result: &ProbeResult) -> String {
    format!("{}\t\t{}\t\t{}", result.name, result.http, result.https)
}

/// Writes the plain-text report.
///
/// The header goes out once the candidate count is known, rows follow as each
/// candidate is probed. Dropped candidates leave no trace.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Could not write report line.");
        }
    }
}

impl<W: Write + Send> ScanSink for ConsoleSink<W> {
    fn emit(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Diagnostic(message) => self.write_line(&message),
            ScanEvent::CandidatesFound(_) => {
                self.write_line(HEADER);
                self.write_line(RULE);
            }
            ScanEvent::Probed(result) => self.write_line(&format_row(&result)),
            ScanEvent::Dropped(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ProbeStatus;

    #[test]
    fn row_marks_failed_requests() {
        let result = ProbeResult {
            name: "x.example.com".into(),
            http: ProbeStatus::from_code(200),
            https: ProbeStatus::from_code(403),
        };
        assert_eq!(format_row(&result), "x.example.com\t\t200\t\t403 (Request Failed)");
    }

    #[test]
    fn row_shows_unreachable_columns() {
        let result = ProbeResult {
            name: "gone.example.com".into(),
            http: ProbeStatus::Unreachable,
            https: ProbeStatus::from_code(200),
        };
        assert_eq!(format_row(&result), "gone.example.com\t\tunreachable\t\t200");
    }

    #[test]
    fn sink_writes_header_then_rows() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.emit(ScanEvent::CandidatesFound(2));
        sink.emit(ScanEvent::Dropped("a.example.com".into()));
        sink.emit(ScanEvent::Probed(ProbeResult {
            name: "b.example.com".into(),
            http: ProbeStatus::Ok(200),
            https: ProbeStatus::Ok(200),
        }));

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![HEADER, RULE, "b.example.com\t\t200\t\t200"]);
        assert_eq!(RULE.len(), 61);
    }
}
