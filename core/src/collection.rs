//! # Candidate Collection Service
//!
//! Implements the "collect subdomains" use case.
//!
//! Every configured source is queried concurrently, the raw answers are merged
//! into one accumulator, and the accumulator is validated against the target
//! domain once all sources have finished.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use subscout_common::network::domain::Domain;
use subscout_common::network::hostname;
use subscout_common::sources::{SourceFetcher, SourceReport};
use tracing::{error, info, warn};

/// Outcome of a collection run.
#[derive(Debug, Default)]
pub struct Collection {
    /// Validated hostnames below the domain, apex excluded, sorted.
    pub candidates: BTreeSet<String>,
    /// One entry per source, in completion order.
    pub reports: Vec<SourceReport>,
}

/// Application service for candidate collection.
///
/// Orchestrates collection by:
/// 1. fanning out one task per [`SourceFetcher`];
/// 2. merging each answer as it arrives (the merge is the only shared state);
/// 3. validating the merged set.
pub struct CollectionService {
    sources: Vec<Arc<dyn SourceFetcher>>,
}

impl CollectionService {
    pub fn new(sources: Vec<Arc<dyn SourceFetcher>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Queries every source for `domain` and returns the validated candidates.
    ///
    /// A source that panics is reported as failed; the others are unaffected.
    pub async fn aggregate(&self, domain: &Domain) -> Collection {
        let mut tasks = FuturesUnordered::new();

        for source in &self.sources {
            let name: &'static str = source.name();
            let source: Arc<dyn SourceFetcher> = Arc::clone(source);
            let target: Domain = domain.clone();
            let handle = tokio::spawn(async move { source.fetch(&target).await });
            tasks.push(async move { (name, handle.await) });
        }

        let mut raw: HashSet<String> = HashSet::new();
        let mut reports: Vec<SourceReport> = Vec::with_capacity(self.sources.len());

        while let Some((name, outcome)) = tasks.next().await {
            match outcome {
                Ok(found) => {
                    if found.is_empty() {
                        warn!("{name} found 0 subdomains");
                    } else {
                        info!("{name} found {} subdomains", found.len());
                    }
                    reports.push(SourceReport::from_result(name, &found));
                    raw.extend(found);
                }
                Err(err) => {
                    error!("{name} fetcher failed: {err}");
                    reports.push(SourceReport::failed(name));
                }
            }
        }

        Collection {
            candidates: validate_candidates(raw, domain),
            reports,
        }
    }
}

/// Normalizes raw source output into the final candidate set.
///
/// Invalid strings are dropped, and so is the apex domain itself.
pub fn validate_candidates<I>(raw: I, domain: &Domain) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    raw.into_iter()
        .filter_map(|candidate| hostname::normalize(&candidate, domain))
        .filter(|candidate| candidate != domain.as_str())
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
