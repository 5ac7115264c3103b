//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! deployment logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`operator`] - Operator port implementation used by the CLI

pub mod bootstrap;
pub mod config;
pub mod operator;
