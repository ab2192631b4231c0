// src/core/lookup.rs

use crate::core::error::LookupError;
use crate::core::models::{CertificateEntry, SearchOptions};
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

pub const CRT_SH_ENDPOINT: &str = "https://crt.sh/";

/// `crt.sh` has been known to reject clients without a browser-like agent.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1";

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub endpoint: Url,
    pub user_agent: String,
    /// No timeout unless set; the client default applies.
    pub timeout: Option<Duration>,
}

impl LookupSettings {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Builds the search URL for `domain`.
///
/// With `wildcard` set, the query becomes `%.{domain}` so that every subdomain
/// matches, unless the caller already wrote a `%` pattern. The query pairs are
/// form-encoded, so `%` goes on the wire as `%25`.
pub fn build_query_url(endpoint: &Url, domain: &str, options: SearchOptions) -> Url {
    let pattern = if options.wildcard && !domain.contains('%') {
        format!("%.{}", domain)
    } else {
        domain.to_string()
    };

    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", &pattern).append_pair("output", "json");
        if !options.expired {
            pairs.append_pair("exclude", "expired");
        }
    }
    url
}

/// Parses a lookup body into its `name_value` strings, in response order.
///
/// The expected shape is a JSON array of objects. Older `crt.sh` responses were
/// a run of objects with no enclosing array and no separating commas
/// (`{..}{..}`); when the array parse fails the body is repaired into
/// `[{..},{..}]` and parsed once more. The error of the second attempt is the
/// one returned, as `LookupError::Parse`.
pub fn parse_entries(body: &str) -> Result<Vec<String>, LookupError> {
    let entries: Vec<CertificateEntry> = match serde_json::from_str(body) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(error = %e, "Lookup body is not a JSON array, trying object repair.");
            let repaired = format!("[{}]", body.replace("}{", "},{"));
            serde_json::from_str(&repaired)?
        }
    };
    Ok(entries.into_iter().map(|entry| entry.name_value).collect())
}

/// Client for the certificate transparency search service.
pub struct CrtShClient {
    client: reqwest::Client,
    settings: LookupSettings,
}

impl CrtShClient {
    pub fn new(settings: LookupSettings) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, settings })
    }

    /// Searches the log for certificates matching `domain`.
    ///
    /// # Arguments
    /// * `domain` - The domain to search for (e.g., "example.com").
    /// * `options` - Wildcard and expiry flags for the query.
    ///
    /// # Returns
    /// The `name_value` strings in response order. Every failure (network,
    /// status of 400 or above, unparseable body) comes back as a `LookupError`,
    /// which callers treat as "no result".
    pub async fn search(
        &self,
        domain: &str,
        options: SearchOptions,
    ) -> Result<Vec<String>, LookupError> {
        let url = build_query_url(&self.settings.endpoint, domain, options);
        info!(%url, "Querying certificate transparency search.");

        let response = match self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.settings.user_agent)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "Lookup request failed.");
                return Err(LookupError::Request(e));
            }
        };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(%status, "Lookup returned an unsuccessful status.");
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        match parse_entries(&body) {
            Ok(names) => {
                info!(entries = names.len(), "Lookup finished.");
                Ok(names)
            }
            Err(e) => {
                error!(error = %e, body_len = body.len(), "Error retrieving information.");
                Err(e)
            }
        }
    }
}
