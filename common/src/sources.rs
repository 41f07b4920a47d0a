//! The contract every intelligence source implements.
//!
//! Concrete sources live in `subscout-core`. The aggregator only ever sees
//! `dyn SourceFetcher`, so adding a source never touches the aggregation code.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::network::domain::Domain;

/// One integration with an external intelligence source.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Display name, also used to exclude the source from a run.
    fn name(&self) -> &'static str;

    /// Queries the source for hostnames related to `domain`.
    ///
    /// Never fails: transport errors, bad statuses, malformed payloads and
    /// timeouts all collapse to an empty set. Returned strings are raw and
    /// must be validated by the caller.
    async fn fetch(&self, domain: &Domain) -> HashSet<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// The source returned at least one string.
    Found,
    /// The source answered with nothing usable, or its request failed.
    Empty,
    /// The fetch task itself died (panicked or was aborted).
    Failed,
}

/// What a single source contributed to a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: &'static str,
    /// Raw strings returned, before validation.
    pub count: usize,
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn from_result(name: &'static str, found: &HashSet<String>) -> Self {
        let status: SourceStatus = if found.is_empty() {
            SourceStatus::Empty
        } else {
            SourceStatus::Found
        };
        Self {
            name,
            count: found.len(),
            status,
        }
    }

    pub fn failed(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            status: SourceStatus::Failed,
        }
    }
}
