//! Inbound (driving) ports consumed by inbound adapters.
//!
//! Inbound ports expose the deployment use-cases to external drivers such
//! as the command-line interface.
//!
//! # Modules
//!
//! - [`operator`]: Operator-facing use-cases for configuration and rollouts

pub mod operator;
