//! CertSpotter issuance search over Certificate Transparency logs.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://api.certspotter.com";
const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct Issuance {
    #[serde(default)]
    dns_names: Vec<String>,
}

pub struct CertSpotter {
    endpoint: Endpoint,
}

impl CertSpotter {
    pub const NAME: &'static str = "CertSpotter";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let issuances: Vec<Issuance> = self
            .endpoint
            .get_json(&format!(
                "/v1/issuances?domain={domain}&include_subdomains=true&expand=dns_names"
            ))
            .await?;
        Ok(issuances
            .into_iter()
            .flat_map(|issuance| issuance.dns_names)
            .collect())
    }
}

#[async_trait]
impl SourceFetcher for CertSpotter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
