//! Shared types and port traits for `subscout`.
//!
//! * [`network`]: the target [`network::domain::Domain`], the hostname validator and
//!   the [`network::probe::ProbeResult`] model.
//! * [`sources`]: the contract every intelligence source implements.
//! * [`liveness`]: the contracts the liveness prober is built from.
//! * [`config`]: run-wide settings assembled by the command line.

pub mod config;
pub mod error;
pub mod liveness;
pub mod network;
pub mod sources;
