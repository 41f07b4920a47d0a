//! # subscout core
//!
//! The two concurrent stages of a run:
//!
//! * **Collection** ([`collection`]): every [`sources`] integration is queried in
//!   parallel and the raw answers are folded into one validated candidate set.
//! * **Probing** ([`probe`]): each candidate is resolved and checked over HTTPS then
//!   HTTP, under a bounded number of in-flight probes.
//!
//! [`report`] persists the probe results as CSV.

pub mod collection;
pub mod headers;
pub mod probe;
pub mod report;
pub mod sources;
