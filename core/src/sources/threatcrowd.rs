//! ThreatCrowd domain reports.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://www.threatcrowd.org";
const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct DomainReport {
    #[serde(default)]
    subdomains: Option<Vec<String>>,
}

pub struct ThreatCrowd {
    endpoint: Endpoint,
}

impl ThreatCrowd {
    pub const NAME: &'static str = "ThreatCrowd";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let report: DomainReport = self
            .endpoint
            .get_json(&format!("/searchApi/v2/domain/report/?domain={domain}"))
            .await?;
        Ok(report.subdomains.unwrap_or_default().into_iter().collect())
    }
}

#[async_trait]
impl SourceFetcher for ThreatCrowd {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
