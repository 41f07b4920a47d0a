//! Wayback Machine CDX index of archived URLs.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};
use super::extract_host;

const BASE_URL: &str = "http://web.archive.org";
const TIMEOUT: Duration = Duration::from_secs(30);
const ROW_LIMIT: usize = 10_000;

pub struct WaybackArchive {
    endpoint: Endpoint,
}

impl WaybackArchive {
    pub const NAME: &'static str = "WaybackArchive";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let rows: Vec<Vec<String>> = self
            .endpoint
            .get_json(&format!(
                "/cdx/search/cdx?url=*.{domain}&output=json&fl=original&collapse=urlkey&limit={ROW_LIMIT}"
            ))
            .await?;

        // First row is the column header.
        Ok(rows
            .iter()
            .skip(1)
            .filter_map(|row| row.first())
            .filter_map(|original| extract_host(original))
            .collect())
    }
}

#[async_trait]
impl SourceFetcher for WaybackArchive {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
