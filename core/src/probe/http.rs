use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use subscout_common::liveness::HttpProbe;

use crate::headers;

const MAX_REDIRECTS: usize = 10;

/// Probes with a browser-like client that trusts any certificate.
///
/// Follows up to ten redirects and reports the status of the last response.
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client: Client = Client::builder()
            .default_headers(headers::browser_headers())
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .context("building probe HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn status(&self, url: &str) -> anyhow::Result<u16> {
        let response = self.client.get(url).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Stand-in used when no HTTP client could be built; every request fails.
pub struct NoHttpClient;

#[async_trait]
impl HttpProbe for NoHttpClient {
    async fn status(&self, url: &str) -> anyhow::Result<u16> {
        anyhow::bail!("no HTTP client available for {url}")
    }
}
