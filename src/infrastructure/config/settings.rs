//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all deployment
//! settings. Configuration is loaded from a TOML file; the project can be
//! overridden with the `DEPLOYCTL_PROJECT_ID` environment variable.
//! Relative paths in the file (manifest directory, build contexts) are
//! anchored at the directory containing the file.
//!
//! # Example
//!
//! ```no_run
//! use deployctl::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("deploy.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::images::ImagesConfig;
use super::logging::LoggingConfig;
use super::manifests::ManifestsConfig;
use super::readiness::ReadinessConfig;
use super::secrets::SecretsConfig;
use super::status::StatusConfig;
use super::target::TargetConfig;
use crate::domain::{ImageRole, ImageSpec, ReadinessGate, Stage, StageKind};
use crate::error::{ConfigError, Result};

/// Environment variable overriding `target.project_id`.
pub const PROJECT_ENV: &str = "DEPLOYCTL_PROJECT_ID";

/// Main deployment configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub manifests: ManifestsConfig,

    #[serde(default)]
    pub readiness: ReadinessConfig,

    #[serde(default)]
    pub status: StatusConfig,

    /// Seed credential secret; disabled unless configured.
    #[serde(default)]
    pub secrets: SecretsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Relative paths resolve against the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.base_dir = PathBuf::from(".");

        if let Ok(project) = std::env::var(PROJECT_ENV) {
            if !project.trim().is_empty() {
                config.target.project_id = Some(project.trim().to_string());
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Ok(Self::parse_toml(&content)?.anchored_at(path))
    }

    /// Resolve relative paths against the directory containing `path`.
    #[must_use]
    pub fn anchored_at(mut self, path: &Path) -> Self {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.base_dir = parent.to_path_buf();
        }
        self
    }

    /// Initialize the tracing subscriber from `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Build spec for one image with paths resolved.
    #[must_use]
    pub fn image_spec(&self, role: ImageRole) -> ImageSpec {
        let image = match role {
            ImageRole::Frontend => &self.images.frontend,
            ImageRole::Backend => &self.images.backend,
        };
        image.spec(role, &self.base_dir)
    }

    /// Resolved manifest paths for `stage`.
    #[must_use]
    pub fn manifest_paths(&self, stage: StageKind) -> Vec<PathBuf> {
        self.manifests.resolve(stage, &self.base_dir)
    }

    /// The ordered rollout plan for `namespace`.
    ///
    /// The secrets stage is included only when seed secrets are enabled.
    #[must_use]
    pub fn stages(&self, namespace: &str) -> Vec<Stage> {
        StageKind::ORDER
            .iter()
            .copied()
            .filter(|kind| *kind != StageKind::Secrets || self.secrets.enabled)
            .map(|kind| {
                let stage = Stage::new(kind, self.manifest_paths(kind));
                match self.readiness.selector(kind) {
                    Some(selector) => stage.with_gate(ReadinessGate::new(
                        selector,
                        namespace,
                        self.readiness.timeout(),
                    )),
                    None => stage,
                }
            })
            .collect()
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        require("domain", &self.target.domain)?;
        require("namespace", &self.target.namespace)?;
        require("static_ip_name", &self.target.static_ip_name)?;
        require("registry", &self.images.registry)?;
        require("tag", &self.images.tag)?;
        require("frontend.name", &self.images.frontend.name)?;
        require("backend.name", &self.images.backend.name)?;

        if self.images.frontend.name == self.images.backend.name {
            return Err(ConfigError::InvalidValue {
                field: "images",
                reason: "frontend and backend must use different image names".to_string(),
            }
            .into());
        }
        if self.images.tag.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "tag",
                reason: "must not contain whitespace".to_string(),
            }
            .into());
        }

        if self.readiness.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        for (field, selector) in [
            ("readiness.database", &self.readiness.database),
            ("readiness.backend", &self.readiness.backend),
            ("readiness.frontend", &self.readiness.frontend),
        ] {
            if selector.trim().is_empty() || selector.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be a non-empty label selector without spaces".to_string(),
                }
                .into());
            }
        }

        for kind in [
            StageKind::Namespace,
            StageKind::Database,
            StageKind::Backend,
            StageKind::Frontend,
            StageKind::Certificate,
            StageKind::Ingress,
        ] {
            if self.manifests.files(kind).is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "manifests",
                    reason: format!("stage {kind} has no manifest files"),
                }
                .into());
            }
        }

        require("status.ingress", &self.status.ingress)?;
        require("status.certificate", &self.status.certificate)?;

        if self.secrets.enabled {
            require("secrets.name", &self.secrets.name)?;
            if self.secrets.keys.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "secrets.keys",
                    reason: "must list at least one variable when secrets are enabled"
                        .to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[allow(clippy::result_large_err)]
fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").expect("defaults are valid");
        assert_eq!(config.target.namespace, "apartment");
        assert_eq!(config.images.tag, "prod");
        assert_eq!(config.readiness.timeout_secs, 300);
        assert!(!config.secrets.enabled);
    }

    #[test]
    fn stage_plan_skips_secrets_unless_enabled() {
        let config = Config::parse_toml("").expect("valid");
        let kinds: Vec<_> = config.stages("apartment").iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StageKind::Namespace,
                StageKind::Database,
                StageKind::Backend,
                StageKind::Frontend,
                StageKind::Certificate,
                StageKind::Ingress,
            ]
        );

        let config = Config::parse_toml("[secrets]\nenabled = true\n").expect("valid");
        let kinds: Vec<_> = config.stages("apartment").iter().map(|s| s.kind).collect();
        assert_eq!(kinds[1], StageKind::Secrets);
    }

    #[test]
    fn workload_stages_carry_gates() {
        let config = Config::parse_toml("[readiness]\ntimeout_secs = 120\n").expect("valid");
        for stage in config.stages("apartment") {
            match stage.gate {
                Some(gate) => {
                    assert!(stage.kind.is_workload());
                    assert_eq!(gate.namespace, "apartment");
                    assert_eq!(gate.timeout.as_secs(), 120);
                }
                None => assert!(!stage.kind.is_workload()),
            }
        }
    }

    #[test]
    fn manifests_resolve_under_base_dir() {
        let mut config = Config::parse_toml("[manifests]\ndir = \"deploy/k8s\"\n").expect("valid");
        config.base_dir = PathBuf::from("/repo");
        assert_eq!(
            config.manifest_paths(StageKind::Ingress),
            vec![PathBuf::from("/repo/deploy/k8s/ingress.yaml")]
        );
        assert!(config.manifest_paths(StageKind::Secrets).is_empty());
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = Config::parse_toml("[readiness]\ntimeout_secs = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "timeout_secs",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_selector_with_spaces() {
        let result = Config::parse_toml("[readiness]\nbackend = \"app = backend\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "readiness.backend",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_domain() {
        let result = Config::parse_toml("[target]\ndomain = \"\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "domain" }))
        ));
    }

    #[test]
    fn rejects_shared_image_name() {
        let toml = r#"
[images.frontend]
name = "app"
context = "frontend"

[images.backend]
name = "app"
context = "backend"
"#;
        assert!(matches!(
            Config::parse_toml(toml),
            Err(Error::Config(ConfigError::InvalidValue { field: "images", .. }))
        ));
    }

    #[test]
    fn rejects_stage_without_manifests() {
        let result = Config::parse_toml("[manifests]\ningress = []\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "manifests", .. }))
        ));
    }

    #[test]
    fn rejects_enabled_secrets_without_keys() {
        let result = Config::parse_toml("[secrets]\nenabled = true\nkeys = []\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "secrets.keys",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("[target\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
