//! Local container builds with `docker`, pushed to the registry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::gcloud::path_arg;
use crate::domain::{BuildStrategy, ImageReference, ImageSpec};
use crate::error::Result;
use crate::port::{CommandRunner, ImageBuilder, Invocation};

/// `docker build` + `docker push`, authenticated through the gcloud
/// credential helper.
pub struct LocalDockerBuilder {
    runner: Arc<dyn CommandRunner>,
}

impl LocalDockerBuilder {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl ImageBuilder for LocalDockerBuilder {
    fn strategy(&self) -> BuildStrategy {
        BuildStrategy::Local
    }

    async fn prepare(&self, registry: &str) -> Result<()> {
        info!(registry, "Configuring docker credential helper");
        self.runner
            .run_checked(&Invocation::new(
                "gcloud",
                ["auth", "configure-docker", registry, "--quiet"],
            ))
            .await?;
        Ok(())
    }

    async fn build_and_push(&self, spec: &ImageSpec, reference: &ImageReference) -> Result<()> {
        let image = reference.to_string();
        info!(image = %image, context = %spec.context.display(), "Building locally");
        self.runner
            .run_checked(&Invocation::new(
                "docker",
                [
                    "build".to_string(),
                    "-t".to_string(),
                    image.clone(),
                    "-f".to_string(),
                    path_arg(&spec.dockerfile),
                    path_arg(&spec.context),
                ],
            ))
            .await?;

        info!(image = %image, "Pushing");
        self.runner
            .run_checked(&Invocation::new("docker", ["push".to_string(), image]))
            .await?;
        Ok(())
    }
}
