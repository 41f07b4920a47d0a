//! AlienVault OTX passive DNS.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://otx.alienvault.com";
const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct PassiveDns {
    #[serde(default)]
    passive_dns: Vec<PassiveDnsRecord>,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsRecord {
    #[serde(default)]
    hostname: Option<String>,
}

pub struct AlienVault {
    endpoint: Endpoint,
}

impl AlienVault {
    pub const NAME: &'static str = "AlienVault";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let answer: PassiveDns = self
            .endpoint
            .get_json(&format!("/api/v1/indicators/domain/{domain}/passive_dns"))
            .await?;
        Ok(answer
            .passive_dns
            .into_iter()
            .filter_map(|record| record.hostname)
            .collect())
    }
}

#[async_trait]
impl SourceFetcher for AlienVault {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
