//! BeVigil OSINT API.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

use super::client::{self, Endpoint, FetchError, SourceClient};

const BASE_URL: &str = "https://bevigil.com";
const TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct Subdomains {
    #[serde(default)]
    subdomains: Vec<String>,
}

pub struct BeVigil {
    endpoint: Endpoint,
}

impl BeVigil {
    pub const NAME: &'static str = "BeVigil";

    pub fn new(http: SourceClient) -> Self {
        Self::with_endpoint(Endpoint::new(http, BASE_URL, TIMEOUT))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn query(&self, domain: &Domain) -> Result<HashSet<String>, FetchError> {
        let answer: Subdomains = self
            .endpoint
            .get_json(&format!("/api/{domain}/subdomains/"))
            .await?;
        Ok(answer.subdomains.into_iter().collect())
    }
}

#[async_trait]
impl SourceFetcher for BeVigil {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, domain: &Domain) -> HashSet<String> {
        client::or_empty(Self::NAME, self.query(domain).await)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::sources::testing;

    #[tokio::test]
    async fn reads_subdomain_list() {
        let server: MockServer = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/example.com/subdomains/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domain": "example.com",
                "subdomains": ["api.example.com", "cdn.example.com", "api.example.com"]
            })))
            .mount(&server)
            .await;

        let source: BeVigil = BeVigil::with_endpoint(testing::endpoint(&server.uri()));
        let found: HashSet<String> = source.fetch(&testing::domain()).await;

        let expected: HashSet<String> = ["api.example.com", "cdn.example.com"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn missing_subdomains_key_yields_nothing() {
        let server: MockServer = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "domain": "example.com" })))
            .mount(&server)
            .await;

        let source: BeVigil = BeVigil::with_endpoint(testing::endpoint(&server.uri()));
        assert!(source.fetch(&testing::domain()).await.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_answer_yields_nothing() {
        let server: MockServer = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "subdomains": ["leaked.example.com"] })),
            )
            .mount(&server)
            .await;

        let source: BeVigil = BeVigil::with_endpoint(testing::endpoint(&server.uri()));
        assert!(source.fetch(&testing::domain()).await.is_empty());
    }
}
