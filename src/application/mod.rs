//! Application layer: the deployment use-cases.
//!
//! Each step of a rollout is its own service, driven only through ports:
//!
//! - [`preflight`] - Resolve the target and verify preconditions
//! - [`provision`] - Build and push images
//! - [`patch`] - Point manifests at the resolved images
//! - [`apply`] - Apply stages in order with readiness gates
//! - [`report`] - Read back address and certificate state
//! - [`pipeline`] - Compose the above into `deploy`, `check`, `patch`, `status`

pub mod apply;
pub mod patch;
pub mod pipeline;
pub mod preflight;
pub mod provision;
pub mod report;

pub use pipeline::{DeployPipeline, Services};
