//! Deployment operator implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::DeployPipeline;
use crate::domain::{DeploymentSummary, PatchOutcome, PreflightReport};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::inbound::operator::deployment::{
    DeployOutcome, DeployRequest, DeploymentOperator, TargetRequest,
};
use crate::port::Notifier;

use super::config::parse_anchored;
use super::entry::Operator;

/// Parse the target's configuration and start logging from it.
fn prepare(target: &TargetRequest) -> Result<Config> {
    let config = parse_anchored(&target.config_toml, &target.config_path)?;
    config.logging.with_verbosity(target.verbosity).init();
    debug!(config = %target.config_path.display(), "Configuration loaded");
    Ok(config)
}

#[async_trait]
impl DeploymentOperator for Operator {
    async fn check(
        &self,
        target: &TargetRequest,
        notifier: Arc<dyn Notifier>,
    ) -> Result<PreflightReport> {
        let config = prepare(target)?;
        DeployPipeline::new(&config, bootstrap::build_services(notifier))
            .check(target.project.as_deref())
            .await
    }

    async fn deploy(
        &self,
        target: &TargetRequest,
        request: DeployRequest,
        notifier: Arc<dyn Notifier>,
    ) -> Result<DeployOutcome> {
        let config = prepare(target)?;
        let request = DeployRequest {
            project: target.project.clone(),
            ..request
        };
        DeployPipeline::new(&config, bootstrap::build_services(notifier))
            .deploy(&request)
            .await
    }

    async fn patch(
        &self,
        target: &TargetRequest,
        tag: Option<&str>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Vec<PatchOutcome>> {
        let config = prepare(target)?;
        DeployPipeline::new(&config, bootstrap::build_services(notifier))
            .patch(target.project.as_deref(), tag)
            .await
    }

    async fn status(
        &self,
        target: &TargetRequest,
        notifier: Arc<dyn Notifier>,
    ) -> Result<DeploymentSummary> {
        let config = prepare(target)?;
        DeployPipeline::new(&config, bootstrap::build_services(notifier))
            .status(target.project.as_deref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::error::{ConfigError, Error};
    use crate::port::NullNotifier;

    fn request(config_toml: &str) -> TargetRequest {
        TargetRequest {
            config_toml: config_toml.to_string(),
            config_path: PathBuf::from("deploy.toml"),
            project: Some("demo".into()),
            verbosity: 0,
        }
    }

    #[tokio::test]
    async fn invalid_config_fails_before_any_tool_runs() {
        let result = Operator
            .status(&request("[target]\nnamespace = \"\"\n"), Arc::new(NullNotifier))
            .await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "namespace" }))
        ));
    }

    #[tokio::test]
    async fn malformed_config_is_a_parse_error() {
        let result = Operator
            .patch(&request("[images\n"), None, Arc::new(NullNotifier))
            .await;
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
