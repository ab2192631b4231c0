// src/core/error.rs

use reqwest::StatusCode;
use thiserror::Error;

/// Why a lookup produced no usable list of names.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("lookup returned status {0}")]
    Status(StatusCode),

    #[error("lookup body could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no certificate data retrieved for {domain}")]
    NoLookupResult {
        domain: String,
        #[source]
        source: LookupError,
    },
}
