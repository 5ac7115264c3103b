//! The deployment pipeline: preflight → build → patch → apply → report.
//!
//! Every step runs to completion before the next begins and the first
//! error ends the run. The standalone `check`, `patch` and `status`
//! operations reuse the same steps.

use std::sync::Arc;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::apply::ClusterApplier;
use super::patch::ManifestPatcher;
use super::preflight::{EnvLookup, Preflight};
use super::provision::ImageProvisioner;
use super::report::{ReportRequest, StatusReporter};
use crate::domain::{
    DeploymentSummary, DeploymentTarget, ImageReference, ImageRole, ImageSpec, PatchOutcome,
    PreflightReport, StageKind,
};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::inbound::operator::deployment::{DeployOutcome, DeployRequest};
use crate::port::{BuilderFactory, CloudPlatform, ClusterClient, Event, Notifier};

/// External collaborators the pipeline drives.
#[derive(Clone)]
pub struct Services {
    pub cloud: Arc<dyn CloudPlatform>,
    pub cluster: Arc<dyn ClusterClient>,
    pub builders: Arc<dyn BuilderFactory>,
    pub notifier: Arc<dyn Notifier>,
    pub env: Arc<EnvLookup>,
}

pub struct DeployPipeline<'c> {
    config: &'c Config,
    services: Services,
}

impl<'c> DeployPipeline<'c> {
    pub fn new(config: &'c Config, services: Services) -> Self {
        Self { config, services }
    }

    fn preflight(&self) -> Preflight<'_> {
        Preflight::new(
            self.services.cloud.as_ref(),
            self.services.cluster.as_ref(),
            self.services.notifier.as_ref(),
            self.services.env.as_ref(),
        )
    }

    /// Image specs paired with their references, backend first.
    fn images(&self, project: &str, tag: Option<&str>) -> Result<Vec<(ImageSpec, ImageReference)>> {
        let images = &self.config.images;
        let tag = tag.unwrap_or(images.tag.as_str());
        let project_path = images.project_path(project);
        [ImageRole::Backend, ImageRole::Frontend]
            .into_iter()
            .map(|role| {
                let spec = self.config.image_spec(role);
                let reference = spec.reference(&images.registry, &project_path, tag)?;
                Ok((spec, reference))
            })
            .collect()
    }

    fn patch_manifests(&self, images: &[(ImageSpec, ImageReference)]) -> Result<Vec<PatchOutcome>> {
        let patcher = ManifestPatcher;
        let mut outcomes = Vec::new();
        for (spec, reference) in images {
            let stage = match spec.role {
                ImageRole::Backend => StageKind::Backend,
                ImageRole::Frontend => StageKind::Frontend,
            };
            for outcome in patcher.patch(&self.config.manifest_paths(stage), reference)? {
                self.services.notifier.notify(Event::ManifestPatched {
                    path: outcome.path.clone(),
                    replaced: outcome.replaced,
                    changed: outcome.changed,
                });
                outcomes.push(outcome);
            }
        }
        Ok(outcomes)
    }

    /// Verify preconditions only; nothing is built or applied.
    pub async fn check(&self, project: Option<&str>) -> Result<PreflightReport> {
        self.preflight().run(self.config, project).await
    }

    /// Resolve the project and patch manifests; the cluster is not touched.
    pub async fn patch(&self, project: Option<&str>, tag: Option<&str>) -> Result<Vec<PatchOutcome>> {
        let project = self.preflight().resolve_project(self.config, project).await?;
        let images = self.images(&project, tag)?;
        self.patch_manifests(&images)
    }

    /// Report address and certificate state without deploying.
    pub async fn status(&self, project: Option<&str>) -> Result<DeploymentSummary> {
        let project = self.preflight().resolve_project(self.config, project).await?;
        let target = DeploymentTarget::new(
            project,
            &self.config.target.domain,
            &self.config.target.namespace,
            &self.config.target.static_ip_name,
        );
        let static_address = self
            .services
            .cloud
            .static_address(target.project_id(), target.static_ip_name())
            .await?;
        StatusReporter::new(
            self.services.cluster.as_ref(),
            self.services.notifier.as_ref(),
        )
        .report(ReportRequest {
            target: &target,
            static_address,
            ingress: &self.config.status.ingress,
            certificate: &self.config.status.certificate,
            settle: std::time::Duration::ZERO,
        })
        .await
    }

    /// Full deployment.
    pub async fn deploy(&self, request: &DeployRequest) -> Result<DeployOutcome> {
        let run_id = Uuid::new_v4();
        self.deploy_inner(run_id, request)
            .instrument(info_span!("deploy", run_id = %run_id))
            .await
    }

    async fn deploy_inner(&self, run_id: Uuid, request: &DeployRequest) -> Result<DeployOutcome> {
        let report = self.check(request.project.as_deref()).await?;
        let target = report.target.clone();
        info!(target = %target, "Preflight passed");

        let images = self.images(target.project_id(), request.tag.as_deref())?;

        if request.build {
            let strategy = request.strategy.unwrap_or(self.config.images.strategy);
            let builder = self.services.builders.builder(strategy, target.project_id());
            ImageProvisioner::new(builder.as_ref(), self.services.notifier.as_ref())
                .provision(&self.config.images.registry, &images)
                .await?;
        }

        let patches = self.patch_manifests(&images)?;

        let stages = self.config.stages(target.namespace());
        let completed = ClusterApplier::new(
            self.services.cluster.as_ref(),
            self.services.notifier.as_ref(),
        )
        .apply(target.namespace(), &stages, report.seed_secret.as_ref())
        .await?;
        info!(stages = completed.len(), "Rollout applied");

        let summary = if request.report_status {
            let summary = StatusReporter::new(
                self.services.cluster.as_ref(),
                self.services.notifier.as_ref(),
            )
            .report(ReportRequest {
                target: &target,
                static_address: Some(report.static_address.clone()),
                ingress: &self.config.status.ingress,
                certificate: &self.config.status.certificate,
                settle: self.config.status.settle(),
            })
            .await?;
            Some(summary)
        } else {
            None
        };

        Ok(DeployOutcome {
            run_id,
            target,
            static_address: report.static_address,
            images: images.into_iter().map(|(_, reference)| reference).collect(),
            built: request.build,
            patches,
            stages: completed,
            summary,
        })
    }
}
