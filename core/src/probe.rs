//! Liveness probing of the collected candidates.
//!
//! [`LivenessProber`] decides a single hostname from a [`HostResolver`] and an
//! [`HttpProbe`]; the [`ProbeOrchestrator`] fans that decision out over the
//! whole candidate set with a fixed number of probes in flight.
//!
//! [`HostResolver`]: subscout_common::liveness::HostResolver
//! [`HttpProbe`]: subscout_common::liveness::HttpProbe

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use subscout_common::liveness::{HostResolver, HttpProbe, LivenessCheck};
use subscout_common::network::probe::ProbeResult;
use tracing::warn;

mod http;
mod liveness;
mod resolver;

pub use http::{NoHttpClient, ReqwestProbe};
pub use liveness::{LivenessProber, is_reachable};
pub use resolver::SystemResolver;

/// Builds the production checker from the system resolver and a reqwest client.
///
/// Never fails: see [`assemble_checker`] for the fallbacks.
pub fn liveness_check(probe_timeout: Duration) -> Arc<dyn LivenessCheck> {
    let resolver = SystemResolver::from_system_conf().map(|r| Box::new(r) as Box<dyn HostResolver>);
    let http = ReqwestProbe::new(probe_timeout).map(|h| Box::new(h) as Box<dyn HttpProbe>);
    assemble_checker(resolver, http)
}

/// Pairs a resolver with an HTTP client, substituting for whichever failed to build.
///
/// A missing resolver is replaced by [`SystemResolver::public`]. A missing HTTP
/// client is replaced by [`NoHttpClient`], so every host comes out not working
/// and the run still reaches its report.
pub fn assemble_checker(
    resolver: anyhow::Result<Box<dyn HostResolver>>,
    http: anyhow::Result<Box<dyn HttpProbe>>,
) -> Arc<dyn LivenessCheck> {
    let resolver: Box<dyn HostResolver> = resolver.unwrap_or_else(|err| {
        warn!("System resolver unavailable ({err:#}), using public name servers");
        Box::new(SystemResolver::public())
    });
    let http: Box<dyn HttpProbe> = http.unwrap_or_else(|err| {
        warn!("HTTP client unavailable ({err:#}), every host will be reported as not working");
        Box::new(NoHttpClient)
    });
    Arc::new(LivenessProber::new(resolver, http))
}

/// Runs liveness checks over a candidate set, at most `concurrency` at a time.
pub struct ProbeOrchestrator {
    checker: Arc<dyn LivenessCheck>,
    concurrency: usize,
}

impl ProbeOrchestrator {
    /// A `concurrency` of zero is treated as one.
    pub fn new(checker: Arc<dyn LivenessCheck>, concurrency: usize) -> Self {
        Self {
            checker,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probes every candidate and returns one result each, sorted by hostname.
    ///
    /// `on_result` sees every result as it completes, in completion order. A
    /// probe task that dies is recorded as not working.
    pub async fn probe_all<F>(&self, candidates: &BTreeSet<String>, mut on_result: F) -> Vec<ProbeResult>
    where
        F: FnMut(&ProbeResult),
    {
        let mut in_flight = stream::iter(candidates.iter().cloned())
            .map(|hostname: String| {
                let checker: Arc<dyn LivenessCheck> = Arc::clone(&self.checker);
                async move {
                    let target: String = hostname.clone();
                    let task = tokio::spawn(async move { checker.probe(&target).await });
                    task.await.unwrap_or_else(|err| {
                        warn!("probe for {hostname} died: {err}");
                        ProbeResult::not_working(hostname)
                    })
                }
            })
            .buffer_unordered(self.concurrency);

        let mut results: Vec<ProbeResult> = Vec::with_capacity(candidates.len());
        while let Some(result) = in_flight.next().await {
            on_result(&result);
            results.push(result);
        }

        results.sort_by(|a, b| a.hostname().cmp(b.hostname()));
        results
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
