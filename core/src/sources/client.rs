use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::headers;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("source answered with status {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client shared by every source.
///
/// Cloning is cheap, the underlying connection pool is reference counted.
#[derive(Clone, Debug)]
pub struct SourceClient {
    client: Client,
}

impl SourceClient {
    pub fn new() -> Result<Self, FetchError> {
        let client: Client = Client::builder()
            .default_headers(headers::browser_headers())
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the body of a `200 OK` answer.
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status: StatusCode = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let body: String = self.get_text(url, timeout).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Where and how long a source is queried.
#[derive(Clone, Debug)]
pub struct Endpoint {
    http: SourceClient,
    base: String,
    timeout: Duration,
}

impl Endpoint {
    pub fn new(http: SourceClient, base: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base.into();
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base, path_and_query)
    }

    pub async fn get_text(&self, path_and_query: &str) -> Result<String, FetchError> {
        self.http.get_text(&self.url(path_and_query), self.timeout).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, FetchError> {
        self.http.get_json(&self.url(path_and_query), self.timeout).await
    }
}

/// Collapses a failed source query into an empty result.
pub(crate) fn or_empty(
    source: &'static str,
    outcome: Result<HashSet<String>, FetchError>,
) -> HashSet<String> {
    outcome.unwrap_or_else(|err| {
        debug!(source, error = %err, "source query failed");
        HashSet::new()
    })
}
