//! Intelligence source integrations.
//!
//! Every source implements [`SourceFetcher`] and is independent of the others:
//! no shared state beyond the pooled [`SourceClient`], no retries, and a fixed
//! timeout per request. A source that fails answers with an empty set.
//!
//! Each source takes its base endpoint at construction so tests can point it at
//! a local mock server.

use std::borrow::Cow;
use std::sync::Arc;

use subscout_common::config::Config;
use subscout_common::sources::SourceFetcher;
use url::Url;

mod alienvault;
mod anubis;
mod bevigil;
mod certspotter;
mod client;
mod commoncrawl;
mod crtsh;
mod hackertarget;
mod rapiddns;
mod sublist3r;
mod threatcrowd;
mod wayback;

pub use alienvault::AlienVault;
pub use anubis::Anubis;
pub use bevigil::BeVigil;
pub use certspotter::CertSpotter;
pub use client::{Endpoint, FetchError, SourceClient};
pub use commoncrawl::CommonCrawl;
pub use crtsh::CrtSh;
pub use hackertarget::HackerTarget;
pub use rapiddns::RapidDns;
pub use sublist3r::Sublist3r;
pub use threatcrowd::ThreatCrowd;
pub use wayback::WaybackArchive;

/// Every built-in source, sharing one HTTP client.
pub fn default_sources(http: &SourceClient) -> Vec<Arc<dyn SourceFetcher>> {
    vec![
        Arc::new(CrtSh::new(http.clone())),
        Arc::new(RapidDns::new(http.clone())),
        Arc::new(AlienVault::new(http.clone())),
        Arc::new(HackerTarget::new(http.clone())),
        Arc::new(Anubis::new(http.clone())),
        Arc::new(CommonCrawl::new(http.clone())),
        Arc::new(ThreatCrowd::new(http.clone())),
        Arc::new(WaybackArchive::new(http.clone())),
        Arc::new(Sublist3r::new(http.clone())),
        Arc::new(CertSpotter::new(http.clone())),
        Arc::new(BeVigil::new(http.clone())),
    ]
}

/// Drops every source the configuration excludes.
///
/// Returns the remaining sources together with the excluded names that matched
/// no source at all, so the caller can warn about typos.
pub fn apply_exclusions(
    sources: Vec<Arc<dyn SourceFetcher>>,
    cfg: &Config,
) -> (Vec<Arc<dyn SourceFetcher>>, Vec<String>) {
    let unknown: Vec<String> = cfg
        .excluded_sources
        .iter()
        .filter(|excluded| !sources.iter().any(|s| s.name().eq_ignore_ascii_case(excluded)))
        .cloned()
        .collect();
    let kept: Vec<Arc<dyn SourceFetcher>> = sources
        .into_iter()
        .filter(|source| !cfg.is_source_excluded(source.name()))
        .collect();
    (kept, unknown)
}

/// Pulls the lowercase host out of an archived URL.
///
/// Archive indexes store URLs with and without a scheme, with ports, paths and
/// credentials. Anything that does not parse yields `None`, and so does a host
/// the parser had to rewrite: a Unicode host comes back as punycode and is
/// refused like any other non-ASCII candidate.
pub(crate) fn extract_host(raw: &str) -> Option<String> {
    let raw: &str = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let with_scheme: Cow<'_, str> = if raw.contains("://") {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("http://{raw}"))
    };
    let parsed: Url = Url::parse(&with_scheme).ok()?;
    let host: String = parsed.host_str()?.to_ascii_lowercase();
    with_scheme
        .to_ascii_lowercase()
        .contains(host.as_str())
        .then_some(host)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use subscout_common::network::domain::Domain;

    use super::{Endpoint, SourceClient};

    pub fn client() -> SourceClient {
        SourceClient::new().expect("test client builds")
    }

    pub fn endpoint(base: &str) -> Endpoint {
        Endpoint::new(client(), base, Duration::from_secs(2))
    }

    pub fn domain() -> Domain {
        "example.com".parse().expect("valid domain")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn extracts_host_from_full_url() {
        assert_eq!(
            extract_host("https://API.example.com:8443/v1/users?id=3").as_deref(),
            Some("api.example.com")
        );
    }

    #[test]
    fn extracts_host_without_scheme() {
        assert_eq!(
            extract_host("dev.example.com/index.html").as_deref(),
            Some("dev.example.com")
        );
        assert_eq!(extract_host("dev.example.com:80").as_deref(), Some("dev.example.com"));
    }

    #[test]
    fn unicode_hosts_are_not_converted_to_punycode() {
        assert_eq!(extract_host("http://bücher.example.com/page"), None);
        assert_eq!(extract_host("bücher.example.com"), None);
        assert_eq!(
            extract_host("https://shop.example.com/bücher").as_deref(),
            Some("shop.example.com")
        );
        assert_eq!(
            extract_host("http://xn--bcher-kva.example.com/").as_deref(),
            Some("xn--bcher-kva.example.com")
        );
    }

    #[test]
    fn rejects_garbage_urls() {
        assert_eq!(extract_host(""), None);
        assert_eq!(extract_host("http://"), None);
    }

    #[test]
    fn default_sources_have_unique_names() {
        let sources = default_sources(&testing::client());
        let names: HashSet<&str> = sources.iter().map(|s| s.name()).collect();
        assert!(sources.len() >= 11);
        assert_eq!(names.len(), sources.len());
    }

    #[test]
    fn exclusions_remove_sources_and_report_unknown_names() {
        let cfg: Config = Config {
            excluded_sources: vec!["CRT.SH".to_string(), "wayback".to_string(), "anubis".to_string()],
            ..Config::default()
        };

        let (kept, unknown) = apply_exclusions(default_sources(&testing::client()), &cfg);
        let names: Vec<&str> = kept.iter().map(|s| s.name()).collect();

        assert_eq!(kept.len(), 9);
        assert!(!names.contains(&CrtSh::NAME));
        assert!(!names.contains(&Anubis::NAME));
        assert_eq!(unknown, vec!["wayback".to_string()]);
    }
}
