//! Operator-facing inbound ports consumed by CLI adapters.

pub mod configuration;
pub mod deployment;
pub mod port;
