//! HackerTarget host search, one `host,ip` pair per line.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://api.hackertarget.com";
const TIMEOUT: Duration = Duration::from_secs(20);

pub struct HackerTarget {
    endpoint: Endpoint,
}

impl HackerTarget {
    pub const NAME: &'static str = "HackerTarget";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let body: String = self
            .endpoint
            .get_text(&format!("/hostsearch/?q={domain}"))
            .await?;
        Ok(parse_lines(&body))
    }
}

/// Takes the first comma separated field of every non-blank line.
///
/// Quota and error messages come back as plain text lines too; they are left
/// for validation to drop.
fn parse_lines(body: &str) -> HashSet<String> {
    body.lines()
        .filter_map(|line| line.split(',').next())
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl SourceFetcher for HackerTarget {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
