//! The public Sublist3r search API.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://api.sublist3r.com";
const TIMEOUT: Duration = Duration::from_secs(20);

pub struct Sublist3r {
    endpoint: Endpoint,
}

impl Sublist3r {
    pub const NAME: &'static str = "Sublist3rAPI";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let hosts: Option<Vec<String>> = self
            .endpoint
            .get_json(&format!("/search.php?domain={domain}"))
            .await?;
        Ok(hosts.unwrap_or_default().into_iter().collect())
    }
}

#[async_trait]
impl SourceFetcher for Sublist3r {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
