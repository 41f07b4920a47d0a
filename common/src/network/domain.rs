//! # Target Domain Model
//!
//! The root domain a run investigates. It is normalized once when parsed and
//! stays read-only for the rest of the run.
//!
//! Accepted inputs:
//! * A bare domain (e.g., `example.com`).
//! * A URL (e.g., `https://www.example.com/login?next=/`).
//! * A host with a port or trailing dot (e.g., `example.com:8443`, `example.com.`).

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::network::hostname;

/// A normalized, lowercase domain such as `example.com`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default name of the CSV report for this domain.
    pub fn report_file_name(&self) -> String {
        format!("{}_subdomains.csv", self.0)
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    /// Parses and normalizes a domain.
    ///
    /// Strips, in order: surrounding whitespace, an `http://`/`https://` scheme,
    /// a leading `www.`, any path, query or fragment, a port and trailing dots.
    /// What remains must satisfy the hostname grammar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered: String = s.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(DomainError::Empty);
        }
        if !lowered.is_ascii() {
            return Err(DomainError::NonAscii(s.trim().to_string()));
        }

        let without_scheme: &str = lowered
            .strip_prefix("https://")
            .or_else(|| lowered.strip_prefix("http://"))
            .unwrap_or(&lowered);
        let without_www: &str = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);

        let host: &str = without_www
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        let host: &str = host.split(':').next().unwrap_or_default();
        let host: &str = host.trim_end_matches('.');

        if host.is_empty() {
            return Err(DomainError::Empty);
        }
        if !hostname::is_valid_syntax(host) {
            return Err(DomainError::Invalid(s.trim().to_string()));
        }

        Ok(Self(host.to_string()))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
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
