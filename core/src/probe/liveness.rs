use async_trait::async_trait;
use subscout_common::liveness::{HostResolver, HttpProbe, LivenessCheck};
use subscout_common::network::probe::{Protocol, ProbeResult};
use tracing::debug;

/// Whether an HTTP status counts as a live service (2xx and 3xx).
pub fn is_reachable(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Decides liveness with a DNS lookup followed by HTTPS then HTTP.
///
/// Names that do not resolve are never sent an HTTP request. Any failure of a
/// protocol, transport error or unreachable status alike, moves on to the next.
pub struct LivenessProber<R, H> {
    resolver: R,
    http: H,
}

impl<R, H> LivenessProber<R, H>
where
    R: HostResolver,
    H: HttpProbe,
{
    pub fn new(resolver: R, http: H) -> Self {
        Self { resolver, http }
    }
}

#[async_trait]
impl<R, H> LivenessCheck for LivenessProber<R, H>
where
    R: HostResolver,
    H: HttpProbe,
{
    async fn probe(&self, hostname: &str) -> ProbeResult {
        if let Err(err) = self.resolver.resolve(hostname).await {
            debug!(hostname, error = %err, "does not resolve");
            return ProbeResult::not_working(hostname);
        }

        for protocol in Protocol::PROBE_ORDER {
            let url: String = protocol.url_for(hostname);
            match self.http.status(&url).await {
                Ok(status) if is_reachable(status) => {
                    return ProbeResult::working(hostname, protocol);
                }
                Ok(status) => debug!(url = url.as_str(), status, "unreachable status"),
                Err(err) => debug!(url = url.as_str(), error = %err, "request failed"),
            }
        }

        ProbeResult::not_working(hostname)
    }
}
