//! Operator implementations for inbound adapters.

pub mod config;
pub mod deployment;
pub mod entry;

pub use entry::Operator;
