use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, ensure};
use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use subscout_common::liveness::HostResolver;
use tokio::time::timeout;

const DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Used when the host has no usable resolver configuration.
const PUBLIC_NAME_SERVERS: [Ipv4Addr; 2] = [Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(8, 8, 8, 8)];

/// Stub resolver driven by the host's own resolver configuration.
pub struct SystemResolver {
    inner: TokioResolver,
    timeout: Duration,
}

impl SystemResolver {
    pub fn from_system_conf() -> anyhow::Result<Self> {
        let inner: TokioResolver = TokioResolver::builder(TokioConnectionProvider::default())
            .context("Failed to create resolver")?
            .build();
        Ok(Self::wrap(inner))
    }

    /// Resolver that queries well-known public name servers over UDP.
    pub fn public() -> Self {
        let mut config: ResolverConfig = ResolverConfig::new();
        for ip in PUBLIC_NAME_SERVERS {
            config.add_name_server(NameServerConfig::new(
                SocketAddr::new(IpAddr::V4(ip), 53),
                Protocol::Udp,
            ));
        }
        let inner: TokioResolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default()).build();
        Self::wrap(inner)
    }

    fn wrap(inner: TokioResolver) -> Self {
        Self {
            inner,
            timeout: DNS_TIMEOUT,
        }
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> anyhow::Result<Vec<IpAddr>> {
        let lookup = timeout(self.timeout, self.inner.lookup_ip(hostname))
            .await
            .with_context(|| format!("DNS lookup for {hostname} timed out"))??;
        let addrs: Vec<IpAddr> = lookup.iter().collect();
        ensure!(!addrs.is_empty(), "{hostname} has no addresses");
        Ok(addrs)
    }
}
