//! Image build configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{BuildStrategy, ImageRole, ImageSpec};

/// Registry, tag and build settings for both images.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Registry host, e.g. `gcr.io` or `europe-docker.pkg.dev`.
    pub registry: String,
    /// Artifact Registry repository placed after the project in image paths.
    pub repository: Option<String>,
    /// Tag pushed and patched into manifests.
    pub tag: String,
    /// Default build strategy when `--strategy` is not given.
    pub strategy: BuildStrategy,
    pub frontend: ImageConfig,
    pub backend: ImageConfig,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            registry: "gcr.io".into(),
            repository: None,
            tag: "prod".into(),
            strategy: BuildStrategy::Remote,
            frontend: ImageConfig::named("apartment-frontend", "frontend"),
            backend: ImageConfig::named("apartment-backend", "backend"),
        }
    }
}

impl ImagesConfig {
    /// Path between the registry host and the image name.
    #[must_use]
    pub fn project_path(&self, project: &str) -> String {
        match &self.repository {
            Some(repository) => format!("{project}/{repository}"),
            None => project.to_string(),
        }
    }
}

/// One image: registry name and build sources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageConfig {
    pub name: String,
    /// Build context, relative to the config file.
    pub context: PathBuf,
    /// Defaults to `<context>/Dockerfile`.
    #[serde(default)]
    pub dockerfile: Option<PathBuf>,
}

impl ImageConfig {
    fn named(name: &str, context: &str) -> Self {
        Self {
            name: name.into(),
            context: context.into(),
            dockerfile: None,
        }
    }

    /// Resolve into a build spec with paths anchored at `base`.
    #[must_use]
    pub fn spec(&self, role: ImageRole, base: &Path) -> ImageSpec {
        let context = base.join(&self.context);
        let dockerfile = match &self.dockerfile {
            Some(path) => base.join(path),
            None => context.join("Dockerfile"),
        };
        ImageSpec {
            role,
            name: self.name.clone(),
            context,
            dockerfile,
        }
    }
}
