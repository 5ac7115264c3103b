//! Configuration operator implementation.

use std::path::Path;

use crate::domain::{ImageRole, StageKind};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::inbound::operator::configuration::{
    ConfigImage, ConfigImages, ConfigSeedSecret, ConfigStage, ConfigTarget,
    ConfigValidationReport, ConfigView, ConfigurationOperator,
};

use super::entry::Operator;

/// Parse `config_toml` and anchor its relative paths at `config_path`.
pub(super) fn parse_anchored(config_toml: &str, config_path: &Path) -> Result<Config> {
    Ok(Config::parse_toml(config_toml)?.anchored_at(config_path))
}

impl ConfigurationOperator for Operator {
    fn show_config(&self, config_toml: &str, config_path: &Path) -> Result<ConfigView> {
        let config = parse_anchored(config_toml, config_path)?;

        let images = [ImageRole::Backend, ImageRole::Frontend]
            .into_iter()
            .map(|role| {
                let spec = config.image_spec(role);
                ConfigImage {
                    role,
                    name: spec.name,
                    context: spec.context,
                }
            })
            .collect();

        let stages = config
            .stages(&config.target.namespace)
            .into_iter()
            .map(|stage| ConfigStage {
                kind: stage.kind,
                selector: stage.gate.map(|gate| gate.selector),
                manifests: stage.manifests,
            })
            .collect();

        Ok(ConfigView {
            target: ConfigTarget {
                project_id: config.target.project_id.clone(),
                domain: config.target.domain.clone(),
                namespace: config.target.namespace.clone(),
                static_ip_name: config.target.static_ip_name.clone(),
            },
            images: ConfigImages {
                registry: config.images.registry.clone(),
                repository: config.images.repository.clone(),
                tag: config.images.tag.clone(),
                strategy: config.images.strategy,
                images,
            },
            stages,
            readiness_timeout_secs: config.readiness.timeout_secs,
            settle_secs: config.status.settle_secs,
            ingress: config.status.ingress.clone(),
            certificate: config.status.certificate.clone(),
            seed_secret: config.secrets.enabled.then(|| ConfigSeedSecret {
                name: config.secrets.name.clone(),
                keys: config.secrets.keys.clone(),
            }),
        })
    }

    fn validate_config(
        &self,
        config_toml: &str,
        config_path: &Path,
    ) -> Result<ConfigValidationReport> {
        let config = parse_anchored(config_toml, config_path)?;

        let warnings = StageKind::ORDER
            .iter()
            .flat_map(|kind| config.manifest_paths(*kind))
            .filter(|manifest| !manifest.exists())
            .map(|manifest| format!("manifest not found: {}", manifest.display()))
            .collect();

        Ok(ConfigValidationReport { warnings })
    }
}
