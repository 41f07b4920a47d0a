//! Anubis subdomain database (jldc.me).

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://jldc.me";
const TIMEOUT: Duration = Duration::from_secs(20);

pub struct Anubis {
    endpoint: Endpoint,
}

impl Anubis {
    pub const NAME: &'static str = "Anubis";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        // Errors come back as a JSON object, which fails to decode as a list.
        let hosts: Vec<String> = self
            .endpoint
            .get_json(&format!("/anubis/subdomains/{domain}"))
            .await?;
        Ok(hosts.into_iter().collect())
    }
}

#[async_trait]
impl SourceFetcher for Anubis {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}
