//! Configuration projections for operator-facing adapters.

use std::path::{Path, PathBuf};

use crate::domain::{BuildStrategy, ImageRole, StageKind};
use crate::error::Result;

/// Target section of a configuration view.
#[derive(Debug, Clone)]
pub struct ConfigTarget {
    /// `None` means the project is auto-detected at run time.
    pub project_id: Option<String>,
    pub domain: String,
    pub namespace: String,
    pub static_ip_name: String,
}

/// One image with its build context resolved.
#[derive(Debug, Clone)]
pub struct ConfigImage {
    pub role: ImageRole,
    pub name: String,
    pub context: PathBuf,
}

/// Images section of a configuration view.
#[derive(Debug, Clone)]
pub struct ConfigImages {
    pub registry: String,
    pub repository: Option<String>,
    pub tag: String,
    pub strategy: BuildStrategy,
    /// Backend first, in build order.
    pub images: Vec<ConfigImage>,
}

/// One stage of the rollout plan.
#[derive(Debug, Clone)]
pub struct ConfigStage {
    pub kind: StageKind,
    pub manifests: Vec<PathBuf>,
    /// Label selector waited on after applying, if the stage is gated.
    pub selector: Option<String>,
}

/// Seed secret section, present only when enabled.
#[derive(Debug, Clone)]
pub struct ConfigSeedSecret {
    pub name: String,
    pub keys: Vec<String>,
}

/// Full configuration projection for `config show`.
#[derive(Debug, Clone)]
pub struct ConfigView {
    pub target: ConfigTarget,
    pub images: ConfigImages,
    pub stages: Vec<ConfigStage>,
    pub readiness_timeout_secs: u64,
    pub settle_secs: u64,
    pub ingress: String,
    pub certificate: String,
    pub seed_secret: Option<ConfigSeedSecret>,
}

/// Validation output for `config validate`.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidationReport {
    pub warnings: Vec<String>,
}

/// Configuration use-cases for operator-facing adapters.
///
/// `config_path` is where `config_toml` was read from; relative paths in the
/// file resolve against its directory.
pub trait ConfigurationOperator: Send + Sync {
    /// Build a projection for `config show`.
    fn show_config(&self, config_toml: &str, config_path: &Path) -> Result<ConfigView>;

    /// Validate config and return non-fatal warnings.
    fn validate_config(&self, config_toml: &str, config_path: &Path)
        -> Result<ConfigValidationReport>;
}
