use thiserror::Error;

/// Reasons an operator-supplied domain is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain must not be empty")]
    Empty,
    #[error("domain '{0}' contains non-ASCII characters, use its punycode form")]
    NonAscii(String),
    #[error("'{0}' is not a valid domain name")]
    Invalid(String),
}
