//! Rollout use-cases for operator-facing adapters.
//!
//! Every request carries the raw configuration text; the operator parses
//! it, initializes logging and wires the real tools before running.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    BuildStrategy, DeploymentSummary, DeploymentTarget, ImageReference, PatchOutcome,
    PreflightReport, StageKind,
};
use crate::error::Result;
use crate::port::outbound::notifier::Notifier;

/// The configuration a command runs against.
#[derive(Debug, Clone)]
pub struct TargetRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,
    /// Where the content was read from.
    pub config_path: PathBuf,
    /// Overrides every other project source.
    pub project: Option<String>,
    /// Number of `-v` flags; raises the log level.
    pub verbosity: u8,
}

/// What the operator asked `deploy` to do.
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    pub project: Option<String>,
    /// Build and push images before applying.
    pub build: bool,
    /// Overrides `images.strategy`.
    pub strategy: Option<BuildStrategy>,
    /// Overrides `images.tag`.
    pub tag: Option<String>,
    /// Poll and report status after the rollout.
    pub report_status: bool,
}

/// Everything a finished deployment produced.
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub run_id: Uuid,
    pub target: DeploymentTarget,
    pub static_address: String,
    pub images: Vec<ImageReference>,
    pub built: bool,
    pub patches: Vec<PatchOutcome>,
    pub stages: Vec<StageKind>,
    pub summary: Option<DeploymentSummary>,
}

/// Rollout use-cases. Progress is reported to `notifier` as it happens.
#[async_trait]
pub trait DeploymentOperator: Send + Sync {
    /// Verify preconditions without building or applying anything.
    async fn check(
        &self,
        target: &TargetRequest,
        notifier: Arc<dyn Notifier>,
    ) -> Result<PreflightReport>;

    /// Run the whole rollout. `request.project` is ignored in favour of
    /// `target.project`.
    async fn deploy(
        &self,
        target: &TargetRequest,
        request: DeployRequest,
        notifier: Arc<dyn Notifier>,
    ) -> Result<DeployOutcome>;

    /// Point the workload manifests at the images for `tag`.
    async fn patch(
        &self,
        target: &TargetRequest,
        tag: Option<&str>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Vec<PatchOutcome>>;

    /// Read back the ingress address and certificate state.
    async fn status(
        &self,
        target: &TargetRequest,
        notifier: Arc<dyn Notifier>,
    ) -> Result<DeploymentSummary>;
}
