// src/core/runner.rs

use crate::core::error::{LookupError, ScanError};
use crate::core::extract::candidate_names;
use crate::core::lookup::CrtShClient;
use crate::core::models::{ScanEvent, ScanSummary, SearchOptions};
use crate::core::prober::Prober;
use tracing::{error, info};

/// Printed for the operator when the lookup body could not be parsed.
pub const LOOKUP_DIAGNOSTIC: &str = "Error retrieving information.";

/// Receives progress while a scan runs.
pub trait ScanSink {
    fn emit(&mut self, event: ScanEvent);
}

fn dispatch<S: ScanSink>(sink: &mut S, summary: &mut ScanSummary, event: ScanEvent) {
    summary.record(&event);
    sink.emit(event);
}

/// Runs one complete scan: lookup, extraction, then one probe per candidate.
///
/// Candidates are probed one after the other, in sorted order. Each outcome is
/// handed to `sink` as soon as it is known.
///
/// # Arguments
/// * `lookup` - Client for the certificate transparency search.
/// * `prober` - Checks each candidate.
/// * `target` - The domain to enumerate (e.g., "example.com").
/// * `options` - Wildcard and expiry flags for the lookup.
/// * `sink` - Where progress goes.
///
/// # Returns
/// The run's counters, or `ScanError::NoLookupResult` when the lookup gave
/// nothing to work with. An empty lookup is not an error: the scan finishes
/// with zero candidates.
pub async fn run_scan<P, S>(
    lookup: &CrtShClient,
    prober: &P,
    target: &str,
    options: SearchOptions,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    P: Prober + Sync,
    S: ScanSink + Send,
{
    info!(target, wildcard = options.wildcard, expired = options.expired, "Starting scan.");
    let mut summary = ScanSummary::default();

    let names = match lookup.search(target, options).await {
        Ok(names) => names,
        Err(e) => {
            if matches!(e, LookupError::Parse(_)) {
                dispatch(sink, &mut summary, ScanEvent::Diagnostic(LOOKUP_DIAGNOSTIC.to_string()));
            }
            error!(target, error = %e, "No lookup result, stopping scan.");
            return Err(ScanError::NoLookupResult {
                domain: target.to_string(),
                source: e,
            });
        }
    };

    let candidates = candidate_names(&names);
    info!(entries = names.len(), candidates = candidates.len(), "Probing candidates.");
    dispatch(sink, &mut summary, ScanEvent::CandidatesFound(candidates.len()));

    for candidate in &candidates {
        let event = match prober.probe(candidate).await {
            Some(result) => ScanEvent::Probed(result),
            None => ScanEvent::Dropped(candidate.clone()),
        };
        dispatch(sink, &mut summary, event);
    }

    info!(
        reported = summary.reported,
        failed_status = summary.failed_status,
        dropped = summary.dropped,
        "Scan finished."
    );
    Ok(summary)
}
