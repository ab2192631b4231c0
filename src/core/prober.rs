// src/core/prober.rs

use crate::core::extract::normalize_candidate;
use crate::core::models::{ProbeResult, ProbeStatus};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// What to do with a candidate whose request never got a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnreachablePolicy {
    /// Leave it out of the report. A failed plaintext probe also skips the
    /// encrypted one.
    #[default]
    Drop,
    /// Always run both probes and report failures as `unreachable`.
    Report,
}

#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    /// Applies to each request on its own.
    pub timeout: Duration,
    pub unreachable: UnreachablePolicy,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            unreachable: UnreachablePolicy::default(),
        }
    }
}

/// Checks a single candidate name.
///
/// `None` means the candidate is left out of the report.
pub trait Prober {
    fn probe(&self, candidate: &str) -> impl Future<Output = Option<ProbeResult>> + Send;
}

/// Probes `http://<name>` then `https://<name>` with plain GETs.
pub struct HttpProber {
    client: reqwest::Client,
    settings: ProbeSettings,
}

impl HttpProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    async fn fetch_status(&self, url: &str) -> ProbeStatus {
        match self.client.get(url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                debug!(url, code, "Probe answered.");
                ProbeStatus::from_code(code)
            }
            Err(e) => {
                debug!(url, error = %e, timeout = e.is_timeout(), "Probe request failed.");
                ProbeStatus::Unreachable
            }
        }
    }

    /// Runs both probes for `name` against explicit URLs, sequentially.
    pub async fn probe_urls(
        &self,
        name: &str,
        http_url: &str,
        https_url: &str,
    ) -> Option<ProbeResult> {
        let dropping = self.settings.unreachable == UnreachablePolicy::Drop;

        let http = self.fetch_status(http_url).await;
        if dropping && http.is_unreachable() {
            info!(name, "Dropping candidate, plaintext probe failed.");
            return None;
        }

        let https = self.fetch_status(https_url).await;
        if dropping && https.is_unreachable() {
            info!(name, "Dropping candidate, encrypted probe failed.");
            return None;
        }

        Some(ProbeResult {
            name: name.to_string(),
            http,
            https,
        })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, candidate: &str) -> Option<ProbeResult> {
        let name = normalize_candidate(candidate);
        let http_url = format!("http://{}", name);
        let https_url = format!("https://{}", name);
        self.probe_urls(name, &http_url, &https_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober(unreachable: UnreachablePolicy) -> HttpProber {
        HttpProber::new(ProbeSettings {
            timeout: Duration::from_secs(2),
            unreachable,
        })
        .unwrap()
    }

    /// A local address with nothing listening on it.
    fn closed_address() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr.to_string()
    }

    #[tokio::test]
    async fn reports_codes_and_marks_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plain"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/secure"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = prober(UnreachablePolicy::Drop)
            .probe_urls(
                "x.example.com",
                &format!("{}/plain", server.uri()),
                &format!("{}/secure", server.uri()),
            )
            .await
            .unwrap();

        assert_eq!(result.name, "x.example.com");
        assert_eq!(result.http, ProbeStatus::Ok(200));
        assert_eq!(result.https, ProbeStatus::Failed(403));
        assert_eq!(result.http.to_string(), "200");
        assert_eq!(result.https.to_string(), "403 (Request Failed)");
    }

    #[tokio::test]
    async fn connection_errors_drop_the_candidate() {
        let address = closed_address();
        assert_eq!(prober(UnreachablePolicy::Drop).probe(&address).await, None);
    }

    #[tokio::test]
    async fn connection_errors_can_be_reported() {
        let address = closed_address();
        let result = prober(UnreachablePolicy::Report).probe(&address).await.unwrap();
        assert_eq!(result.http, ProbeStatus::Unreachable);
        assert_eq!(result.https, ProbeStatus::Unreachable);
    }

    #[tokio::test]
    async fn leading_dots_are_stripped_before_probing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;
        let address = server.address().to_string();

        // The mock speaks plain HTTP only, so the HTTPS handshake fails.
        let result = prober(UnreachablePolicy::Report)
            .probe(&format!(".{}", address))
            .await
            .unwrap();
        assert_eq!(result.name, address);
        assert_eq!(result.http, ProbeStatus::Ok(200));
        assert_eq!(result.https, ProbeStatus::Unreachable);

        assert_eq!(
            prober(UnreachablePolicy::Drop).probe(&format!(".{}", address)).await,
            None
        );
    }

    #[tokio::test]
    async fn slow_servers_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let prober = HttpProber::new(ProbeSettings {
            timeout: Duration::from_millis(200),
            unreachable: UnreachablePolicy::Drop,
        })
        .unwrap();
        let url = server.uri();
        assert_eq!(prober.probe_urls("slow.example.com", &url, &url).await, None);
    }
}
