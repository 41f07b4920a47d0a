//! Ports the liveness prober is assembled from.
//!
//! The prober itself lives in `subscout-core` and only depends on these traits,
//! which keeps DNS and HTTP swappable for stubs in tests.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::network::probe::ProbeResult;

/// Resolves a hostname to its addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Fails when the name does not resolve, including an empty answer.
    async fn resolve(&self, hostname: &str) -> anyhow::Result<Vec<IpAddr>>;
}

/// Issues a single GET and reports the final status code.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn status(&self, url: &str) -> anyhow::Result<u16>;
}

/// Classifies one hostname as working or not.
#[async_trait]
pub trait LivenessCheck: Send + Sync {
    async fn probe(&self, hostname: &str) -> ProbeResult;
}

#[async_trait]
impl<T: HostResolver + ?Sized> HostResolver for Box<T> {
    async fn resolve(&self, hostname: &str) -> anyhow::Result<Vec<IpAddr>> {
        (**self).resolve(hostname).await
    }
}

#[async_trait]
impl<T: HttpProbe + ?Sized> HttpProbe for Box<T> {
    async fn status(&self, url: &str) -> anyhow::Result<u16> {
        (**self).status(url).await
    }
}
