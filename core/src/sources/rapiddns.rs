//! RapidDNS, scraped from its HTML result table.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://rapiddns.io";
const TIMEOUT: Duration = Duration::from_secs(20);

pub struct RapidDns {
    endpoint: Endpoint,
}

impl RapidDns {
    pub const NAME: &'static str = "RapidDNS";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let page: String = self
            .endpoint
            .get_text(&format!("/subdomain/{domain}?full=1"))
            .await?;
        Ok(scrape_cells(&page, domain))
    }
}

/// Collects every `<td>host</td>` cell naming a host under `domain`.
fn scrape_cells(page: &str, domain: &Domain) -> HashSet<String> {
    let pattern: String = format!(r"(?i)<td>([a-z0-9.\-]+\.{})</td>", regex::escape(domain.as_str()));
    let Ok(cell) = Regex::new(&pattern) else {
        return HashSet::new();
    };
    cell.captures_iter(page)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[async_trait]
impl SourceFetcher for RapidDns {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
