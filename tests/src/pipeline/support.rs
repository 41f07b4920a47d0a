use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use subscout_common::liveness::{HostResolver, HttpProbe};
use subscout_common::network::domain::Domain;
use subscout_common::sources::SourceFetcher;

/// Source that answers with a fixed list.
pub struct FixedSource {
    pub name: &'static str,
    pub hosts: Vec<&'static str>,
}

#[async_trait]
impl SourceFetcher for FixedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _domain: &Domain) -> HashSet<String> {
        self.hosts.iter().map(|h| h.to_string()).collect()
    }
}

/// Resolves every name except the ones listed.
pub struct DenyListResolver {
    pub unresolvable: Vec<&'static str>,
}

#[async_trait]
impl HostResolver for DenyListResolver {
    async fn resolve(&self, hostname: &str) -> anyhow::Result<Vec<IpAddr>> {
        if self.unresolvable.iter().any(|name| *name == hostname) {
            bail!("{hostname}: NXDOMAIN");
        }
        Ok(vec![IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7))])
    }
}

/// Every URL a [`ScriptedHttp`] was asked for, shared with the test.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// HTTP answers keyed by URL; everything else is a connection failure.
#[derive(Default)]
pub struct ScriptedHttp {
    answers: HashMap<String, u16>,
    calls: CallLog,
}

impl ScriptedHttp {
    pub fn answering(answers: &[(&str, u16)]) -> Self {
        Self {
            answers: answers.iter().map(|(u, s)| (u.to_string(), *s)).collect(),
            calls: CallLog::default(),
        }
    }

    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

pub fn calls_for(log: &CallLog, hostname: &str) -> usize {
    let suffix: String = format!("://{hostname}");
    log.lock().unwrap().iter().filter(|url| url.ends_with(&suffix)).count()
}

#[async_trait]
impl HttpProbe for ScriptedHttp {
    async fn status(&self, url: &str) -> anyhow::Result<u16> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.answers.get(url) {
            Some(status) => Ok(*status),
            None => bail!("connection refused"),
        }
    }
}

pub fn domain() -> Domain {
    "example.com".parse().unwrap()
}
