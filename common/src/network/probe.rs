use std::fmt;

/// Scheme a liveness check was attempted or confirmed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Https,
    Http,
}

impl Protocol {
    /// Order in which schemes are tried against a resolved host.
    pub const PROBE_ORDER: [Protocol; 2] = [Protocol::Https, Protocol::Http];

    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Https => "https://",
            Protocol::Http => "http://",
        }
    }

    pub fn url_for(self, hostname: &str) -> String {
        format!("{}{}", self.scheme(), hostname)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    Working,
    NotWorking,
}

impl Liveness {
    /// Single-letter form used in the CSV report.
    pub fn as_flag(self) -> &'static str {
        match self {
            Liveness::Working => "Y",
            Liveness::NotWorking => "N",
        }
    }
}

/// Outcome of probing one candidate hostname.
///
/// Built once by the probe task that owns the candidate and never mutated. A
/// `Working` result always carries the protocol that proved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    hostname: String,
    liveness: Liveness,
    protocol: Option<Protocol>,
}

impl ProbeResult {
    pub fn working(hostname: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            hostname: hostname.into(),
            liveness: Liveness::Working,
            protocol: Some(protocol),
        }
    }

    pub fn not_working(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            liveness: Liveness::NotWorking,
            protocol: None,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn protocol(&self) -> Option<Protocol> {
        self.protocol
    }

    pub fn is_working(&self) -> bool {
        self.liveness == Liveness::Working
    }
}
