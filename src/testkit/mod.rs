//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`runner`]: [`ScriptedRunner`](runner::ScriptedRunner), a prefix-matched
//!   fake [`CommandRunner`](crate::port::CommandRunner) with a call log.
//! - [`fakes`]: `FakeCloud`, `FakeCluster` and `FakeBuilder`, port-level
//!   stand-ins for the adapters with a call log each.
//! - [`config`]: A canonical configuration and on-disk manifest fixtures.

pub mod config;
pub mod fakes;
pub mod runner;
