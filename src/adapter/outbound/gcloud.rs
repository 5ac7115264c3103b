//! `gcloud`-backed cloud platform and remote image builder.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{BuildStrategy, ImageReference, ImageSpec};
use crate::error::{CommandError, Result};
use crate::port::{CloudPlatform, CommandRunner, ImageBuilder, Invocation};

const PROGRAM: &str = "gcloud";

/// Project detection and static address lookup through `gcloud`.
pub struct GcloudPlatform {
    runner: Arc<dyn CommandRunner>,
}

impl GcloudPlatform {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl CloudPlatform for GcloudPlatform {
    async fn active_project(&self) -> Result<Option<String>> {
        let output = self
            .runner
            .run(&Invocation::new(PROGRAM, ["config", "get-value", "project"]))
            .await?;
        if !output.is_success() {
            warn!(stderr = %output.stderr.trim(), "Could not read gcloud default project");
            return Ok(None);
        }
        // Unset properties print "(unset)" on some gcloud versions.
        Ok(output.value().filter(|value| value != "(unset)"))
    }

    async fn static_address(&self, project: &str, name: &str) -> Result<Option<String>> {
        let invocation = Invocation::new(
            PROGRAM,
            [
                "compute".to_string(),
                "addresses".to_string(),
                "describe".to_string(),
                name.to_string(),
                "--global".to_string(),
                "--project".to_string(),
                project.to_string(),
                "--format=value(address)".to_string(),
            ],
        );
        let output = self.runner.run(&invocation).await?;
        if output.is_success() {
            return Ok(output.value());
        }
        if output.stderr.contains("was not found") || output.stderr.contains("notFound") {
            return Ok(None);
        }
        Err(CommandError::Failed {
            command: invocation.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        }
        .into())
    }
}

/// Builds images on the remote build service (`gcloud builds submit`).
///
/// Cloud Build's `--tag` mode always uses `Dockerfile` at the root of the
/// uploaded context.
pub struct CloudBuildBuilder {
    runner: Arc<dyn CommandRunner>,
    project: String,
}

impl CloudBuildBuilder {
    pub fn new(runner: Arc<dyn CommandRunner>, project: impl Into<String>) -> Self {
        Self {
            runner,
            project: project.into(),
        }
    }
}

#[async_trait]
impl ImageBuilder for CloudBuildBuilder {
    fn strategy(&self) -> BuildStrategy {
        BuildStrategy::Remote
    }

    async fn prepare(&self, _registry: &str) -> Result<()> {
        Ok(())
    }

    async fn build_and_push(&self, spec: &ImageSpec, reference: &ImageReference) -> Result<()> {
        if spec.dockerfile != spec.context.join("Dockerfile") {
            warn!(
                image = %spec.role,
                dockerfile = %spec.dockerfile.display(),
                "Remote builds use <context>/Dockerfile; configured dockerfile is ignored"
            );
        }
        info!(image = %reference, context = %spec.context.display(), "Submitting remote build");
        let invocation = Invocation::new(
            PROGRAM,
            [
                "builds".to_string(),
                "submit".to_string(),
                path_arg(&spec.context),
                "--tag".to_string(),
                reference.to_string(),
                "--project".to_string(),
                self.project.clone(),
            ],
        );
        self.runner.run_checked(&invocation).await?;
        Ok(())
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageRole;
    use crate::error::Error;
    use crate::port::CommandOutput;
    use crate::testkit::runner::ScriptedRunner;

    #[tokio::test]
    async fn unset_project_reads_as_none() {
        let runner = Arc::new(ScriptedRunner::new().on(
            &["gcloud", "config", "get-value"],
            CommandOutput::success("(unset)\n"),
        ));
        let platform = GcloudPlatform::new(runner);
        assert_eq!(platform.active_project().await.expect("read"), None);
    }

    #[tokio::test]
    async fn configured_project_is_trimmed() {
        let runner = Arc::new(ScriptedRunner::new().on(
            &["gcloud", "config", "get-value"],
            CommandOutput::success("demo-123\n"),
        ));
        let platform = GcloudPlatform::new(runner);
        assert_eq!(
            platform.active_project().await.expect("read"),
            Some("demo-123".to_string())
        );
    }

    #[tokio::test]
    async fn missing_address_reads_as_none() {
        let runner = Arc::new(ScriptedRunner::new().on(
            &["gcloud", "compute", "addresses", "describe"],
            CommandOutput::failure(
                1,
                "ERROR: (gcloud.compute.addresses.describe) Could not fetch resource:\n - The resource 'projects/demo/global/addresses/app-ip' was not found\n",
            ),
        ));
        let platform = GcloudPlatform::new(runner);
        assert_eq!(
            platform.static_address("demo", "app-ip").await.expect("lookup"),
            None
        );
    }

    #[tokio::test]
    async fn permission_error_on_address_is_raised() {
        let runner = Arc::new(ScriptedRunner::new().on(
            &["gcloud", "compute", "addresses", "describe"],
            CommandOutput::failure(1, "ERROR: Required 'compute.addresses.get' permission"),
        ));
        let platform = GcloudPlatform::new(runner);
        assert!(matches!(
            platform.static_address("demo", "app-ip").await,
            Err(Error::Command(CommandError::Failed { .. }))
        ));
    }

    #[tokio::test]
    async fn remote_build_submits_context_with_tag() {
        let runner = Arc::new(ScriptedRunner::new());
        let builder = CloudBuildBuilder::new(runner.clone(), "demo");
        let spec = ImageSpec {
            role: ImageRole::Backend,
            name: "apartment-backend".into(),
            context: "backend".into(),
            dockerfile: Path::new("backend").join("Dockerfile"),
        };
        let reference = spec.reference("gcr.io", "demo", "prod").expect("valid");

        builder.build_and_push(&spec, &reference).await.expect("built");

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].args,
            vec![
                "builds",
                "submit",
                "backend",
                "--tag",
                "gcr.io/demo/apartment-backend:prod",
                "--project",
                "demo"
            ]
        );
    }
}
