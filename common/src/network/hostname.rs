//! Candidate hostname validation.
//!
//! Sources hand back raw strings: mixed case, wildcard entries, FQDN trailing
//! dots and look-alike domains. Everything goes through [`normalize`] before it
//! is allowed into the candidate set.

use std::sync::LazyLock;

use regex::Regex;

use crate::network::domain::Domain;

/// Longest hostname DNS can carry in presentation form.
pub const MAX_HOSTNAME_LEN: usize = 253;

static LABEL_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
        .expect("hostname grammar is a valid regex")
});

/// Checks a lowercase string against the label grammar: dot separated labels of
/// 1-63 alphanumeric characters with interior hyphens only.
pub fn is_valid_syntax(host: &str) -> bool {
    host.len() <= MAX_HOSTNAME_LEN && LABEL_GRAMMAR.is_match(host)
}

/// True when `host` is `domain` itself or sits below it on a label boundary.
///
/// `api.example.com` is within `example.com`, `evilexample.com` is not.
pub fn is_within(host: &str, domain: &Domain) -> bool {
    let domain: &str = domain.as_str();
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Folds and validates a raw candidate, returning its canonical form.
///
/// Rules short-circuit in order:
/// 1. lowercase and trim (one trailing dot is dropped), reject empty;
/// 2. reject a leading `*`;
/// 3. reject unless equal to, or dot-bounded below, `domain`;
/// 4. reject unless the label grammar matches.
pub fn normalize(candidate: &str, domain: &Domain) -> Option<String> {
    let folded: String = candidate.trim().to_lowercase();
    let folded: &str = folded.strip_suffix('.').unwrap_or(&folded);

    if folded.is_empty() || folded.starts_with('*') {
        return None;
    }
    if !is_within(folded, domain) || !is_valid_syntax(folded) {
        return None;
    }
    Some(folded.to_string())
}

/// Whether `candidate` passes every validation rule for `domain`.
pub fn validate(candidate: &str, domain: &Domain) -> bool {
    normalize(candidate, domain).is_some()
}
