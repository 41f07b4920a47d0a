//! Common Crawl URL indexes.
//!
//! Each crawl has its own index. They are tried newest first and the first one
//! that yields any host wins; older indexes are not consulted after that.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;
use tracing::debug;

use super::client::{Endpoint, FetchError, SourceClient};
use super::extract_host;

const BASE_URL: &str = "https://index.commoncrawl.org";
const TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_INDEXES: [&str; 3] = [
    "CC-MAIN-2024-51-index",
    "CC-MAIN-2024-46-index",
    "CC-MAIN-2024-38-index",
];

#[derive(Debug, Deserialize)]
struct CaptureRecord {
    #[serde(default)]
    url: Option<String>,
}

pub struct CommonCrawl {
    endpoint: Endpoint,
    indexes: Vec<String>,
}

impl CommonCrawl {
    pub const NAME: &'static str = "CommonCrawl";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            indexes: DEFAULT_INDEXES.iter().map(|index| index.to_string()).collect(),
        }
    }

    pub fn with_indexes<I, S>(mut self, indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexes = indexes.into_iter().map(Into::into).collect();
        self
    }

    async fn query_index(&self, index: &str, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let body: String = self
            .endpoint
            .get_text(&format!("/{index}?url=*.{domain}&output=json"))
            .await?;
        Ok(parse_records(&body))
    }
}

/// Reads one JSON record per line, skipping lines that do not decode.
fn parse_records(body: &str) -> HashSet<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<CaptureRecord>(line).ok())
        .filter_map(|record| record.url)
        .filter_map(|url| extract_host(&url))
        .collect()
}

#[async_trait]
impl SourceFetcher for CommonCrawl {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        for index in &self.indexes {
            match self.query_index(index, domain).await {
                Ok(found) if !found.is_empty() => return found,
                Ok(_) => debug!(source = Self::NAME, index = index.as_str(), "index had no captures"),
                Err(err) => debug!(source = Self::NAME, index = index.as_str(), error = %err, "index query failed"),
            }
        }
        HashSet::new()
    }
}
