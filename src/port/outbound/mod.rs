//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external tools a rollout drives: the
//! process runner underneath everything, the cloud project, the cluster
//! control plane, image builders and progress notification.

pub mod builder;
pub mod cloud;
pub mod cluster;
pub mod command;
pub mod notifier;
