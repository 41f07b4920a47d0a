pub mod domain;
pub mod hostname;
pub mod probe;
