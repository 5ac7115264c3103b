//! Manifest locations per stage.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::StageKind;

/// Manifest files applied by each stage, relative to `dir`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManifestsConfig {
    /// Directory holding the manifests, relative to the config file.
    pub dir: PathBuf,
    pub namespace: Vec<PathBuf>,
    pub database: Vec<PathBuf>,
    pub backend: Vec<PathBuf>,
    pub frontend: Vec<PathBuf>,
    pub certificate: Vec<PathBuf>,
    pub ingress: Vec<PathBuf>,
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        Self {
            dir: "k8s".into(),
            namespace: vec!["namespace.yaml".into()],
            database: vec!["postgres.yaml".into()],
            backend: vec!["backend-deployment.yaml".into()],
            frontend: vec!["frontend-deployment.yaml".into()],
            certificate: vec!["managed-certificate.yaml".into()],
            ingress: vec!["ingress.yaml".into()],
        }
    }
}

impl ManifestsConfig {
    /// Configured files for `stage`, unresolved. The secrets stage has none.
    #[must_use]
    pub fn files(&self, stage: StageKind) -> &[PathBuf] {
        match stage {
            StageKind::Namespace => &self.namespace,
            StageKind::Secrets => &[],
            StageKind::Database => &self.database,
            StageKind::Backend => &self.backend,
            StageKind::Frontend => &self.frontend,
            StageKind::Certificate => &self.certificate,
            StageKind::Ingress => &self.ingress,
        }
    }

    /// Files for `stage` anchored at `base/dir`.
    #[must_use]
    pub fn resolve(&self, stage: StageKind, base: &Path) -> Vec<PathBuf> {
        let dir = base.join(&self.dir);
        self.files(stage).iter().map(|file| dir.join(file)).collect()
    }
}
