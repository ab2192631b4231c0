// src/cli.rs

use crate::core::lookup::{CRT_SH_ENDPOINT, LookupSettings};
use crate::core::models::SearchOptions;
use crate::core::normalize_target;
use crate::core::prober::{ProbeSettings, UnreachablePolicy};
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Find subdomains in certificate transparency logs and check which ones answer
/// over HTTP and HTTPS.
#[derive(Debug, Parser)]
#[command(name = "crtprobe", version, about)]
pub struct Cli {
    /// Domain to enumerate, e.g. example.com. A `%` pattern is sent as is.
    #[arg(required_unless_present = "tui")]
    pub domain: Option<String>,

    /// Search for the exact domain instead of prepending `%.`
    #[arg(long)]
    pub no_wildcard: bool,

    /// Leave expired certificates out of the lookup
    #[arg(long)]
    pub exclude_expired: bool,

    /// Per-request probe timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub timeout: u64,

    /// Lookup timeout in seconds (none by default)
    #[arg(long, value_name = "SECS")]
    pub lookup_timeout: Option<u64>,

    /// Certificate transparency search endpoint
    #[arg(long, value_name = "URL", default_value = CRT_SH_ENDPOINT)]
    pub endpoint: Url,

    /// Report unreachable candidates instead of leaving them out
    #[arg(long)]
    pub show_unreachable: bool,

    /// Open the interactive dashboard
    #[arg(long)]
    pub tui: bool,
}

impl Cli {
    pub fn target(&self) -> Option<String> {
        self.domain.as_deref().map(normalize_target)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            wildcard: !self.no_wildcard,
            expired: !self.exclude_expired,
        }
    }

    pub fn lookup_settings(&self) -> LookupSettings {
        let mut settings = LookupSettings::new(self.endpoint.clone());
        settings.timeout = self.lookup_timeout.map(Duration::from_secs);
        settings
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_secs(self.timeout),
            unreachable: if self.show_unreachable {
                UnreachablePolicy::Report
            } else {
                UnreachablePolicy::Drop
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_behavior() {
        let cli = Cli::try_parse_from(["crtprobe", "example.com"]).unwrap();
        assert_eq!(cli.target().as_deref(), Some("example.com"));
        assert_eq!(cli.search_options(), SearchOptions { wildcard: true, expired: true });
        assert_eq!(cli.endpoint.as_str(), "https://crt.sh/");

        let lookup = cli.lookup_settings();
        assert_eq!(lookup.timeout, None);
        assert!(lookup.user_agent.starts_with("Mozilla/5.0"));

        let probe = cli.probe_settings();
        assert_eq!(probe.timeout, Duration::from_secs(5));
        assert_eq!(probe.unreachable, UnreachablePolicy::Drop);
    }

    #[test]
    fn flags_map_onto_settings() {
        let cli = Cli::try_parse_from([
            "crtprobe",
            "--no-wildcard",
            "--exclude-expired",
            "--timeout",
            "2",
            "--lookup-timeout",
            "30",
            "--show-unreachable",
            "https://www.example.com/",
        ])
        .unwrap();
        assert_eq!(cli.target().as_deref(), Some("www.example.com"));
        assert_eq!(cli.search_options(), SearchOptions { wildcard: false, expired: false });
        assert_eq!(cli.lookup_settings().timeout, Some(Duration::from_secs(30)));
        assert_eq!(cli.probe_settings().timeout, Duration::from_secs(2));
        assert_eq!(cli.probe_settings().unreachable, UnreachablePolicy::Report);
    }

    #[test]
    fn domain_is_required_outside_the_dashboard() {
        assert!(Cli::try_parse_from(["crtprobe"]).is_err());
        let cli = Cli::try_parse_from(["crtprobe", "--tui"]).unwrap();
        assert_eq!(cli.target(), None);
    }
}
