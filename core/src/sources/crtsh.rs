//! Certificate Transparency search through crt.sh.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://crt.sh";
// crt.sh is slow on popular domains.
const TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Debug, Deserialize)]
struct CertificateEntry {
    #[serde(default)]
    name_value: Option<String>,
}

pub struct CrtSh {
    endpoint: Endpoint,
}

impl CrtSh {
    pub const NAME: &'static str = "crt.sh";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let entries: Vec<CertificateEntry> = self
            .endpoint
            .get_json(&format!("/?q=%25.{domain}&output=json"))
            .await?;

        // One certificate lists every SAN in `name_value`, newline separated.
        let names: HashSet<String> = entries
            .into_iter()
            .filter_map(|entry| entry.name_value)
            .flat_map(|value| {
                value
                    .lines()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<String>>()
            })
            .collect();
        Ok(names)
    }
}

#[async_trait]
impl SourceFetcher for CrtSh {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
