//! End-to-end tests across `subscout-core` and `subscout-common`.

#[cfg(test)]
mod pipeline;
