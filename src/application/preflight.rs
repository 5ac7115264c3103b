//! Preconditions checked before anything is built or applied.
//!
//! Nothing here mutates the cluster or the registry: the project is
//! resolved, the static address and cluster connection are verified and
//! the seed secret values are collected. Any failure aborts the run.

use crate::domain::{DeploymentTarget, PreflightReport, SeedSecret};
use crate::error::{PreconditionError, Result};
use crate::infrastructure::config::{Config, PROJECT_ENV};
use crate::port::{CloudPlatform, ClusterClient, Event, Notifier};

/// Reads an environment variable; injectable for tests.
pub type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Process environment lookup, treating blank values as unset.
#[must_use]
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Runs the precondition checks in order.
pub struct Preflight<'a> {
    cloud: &'a dyn CloudPlatform,
    cluster: &'a dyn ClusterClient,
    notifier: &'a dyn Notifier,
    env: &'a EnvLookup,
}

impl<'a> Preflight<'a> {
    pub fn new(
        cloud: &'a dyn CloudPlatform,
        cluster: &'a dyn ClusterClient,
        notifier: &'a dyn Notifier,
        env: &'a EnvLookup,
    ) -> Self {
        Self {
            cloud,
            cluster,
            notifier,
            env,
        }
    }

    /// Resolve the project: flag, then environment, then config file, then
    /// the gcloud default.
    pub async fn resolve_project(&self, config: &Config, flag: Option<&str>) -> Result<String> {
        let explicit = flag
            .map(|value| (value.trim().to_string(), "flag"))
            .or_else(|| (self.env)(PROJECT_ENV).map(|value| (value.trim().to_string(), "environment")))
            .or_else(|| {
                config
                    .target
                    .project_id
                    .as_ref()
                    .map(|value| (value.trim().to_string(), "config"))
            })
            .filter(|(value, _)| !value.is_empty());

        let (project, source) = match explicit {
            Some(found) => found,
            None => match self.cloud.active_project().await? {
                Some(project) => (project, "gcloud"),
                None => return Err(PreconditionError::ProjectUnresolved.into()),
            },
        };

        self.notifier.notify(Event::ProjectResolved {
            project: project.clone(),
            source,
        });
        Ok(project)
    }

    /// Resolve the target and verify every precondition.
    pub async fn run(&self, config: &Config, project_flag: Option<&str>) -> Result<PreflightReport> {
        let project = self.resolve_project(config, project_flag).await?;
        let target = DeploymentTarget::new(
            project,
            &config.target.domain,
            &config.target.namespace,
            &config.target.static_ip_name,
        );

        let static_address = self
            .cloud
            .static_address(target.project_id(), target.static_ip_name())
            .await?
            .ok_or_else(|| PreconditionError::StaticAddressMissing {
                name: target.static_ip_name().to_string(),
                project: target.project_id().to_string(),
            })?;
        self.notifier.notify(Event::StaticAddressVerified {
            name: target.static_ip_name().to_string(),
            address: static_address.clone(),
        });

        let cluster = self.cluster.check_connection().await?;
        self.notifier.notify(Event::ClusterConnected {
            description: cluster.clone(),
        });

        let seed_secret = if config.secrets.enabled {
            Some(self.collect_seed_secret(config)?)
        } else {
            None
        };

        Ok(PreflightReport {
            target,
            static_address,
            cluster,
            seed_secret,
        })
    }

    fn collect_seed_secret(&self, config: &Config) -> Result<SeedSecret> {
        let entries = config
            .secrets
            .keys
            .iter()
            .map(|key| {
                (self.env)(key)
                    .map(|value| (key.clone(), value))
                    .ok_or_else(|| PreconditionError::SeedVariableMissing(key.clone()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(SeedSecret {
            name: config.secrets.name.clone(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::error::Error;
    use crate::port::NullNotifier;
    use crate::testkit::fakes::{FakeCloud, FakeCluster};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn healthy_cloud() -> FakeCloud {
        FakeCloud::new()
            .with_active_project("gcloud-project")
            .with_static_address("34.120.0.1")
    }

    #[tokio::test]
    async fn flag_beats_environment_and_config() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new();
        let env = env_of(&[(PROJECT_ENV, "env-project")]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);
        let mut config = Config::default();
        config.target.project_id = Some("config-project".into());

        let project = preflight
            .resolve_project(&config, Some("flag-project"))
            .await
            .expect("resolved");
        assert_eq!(project, "flag-project");

        let project = preflight.resolve_project(&config, None).await.expect("resolved");
        assert_eq!(project, "env-project");
        assert!(cloud.calls().is_empty());
    }

    #[tokio::test]
    async fn config_project_beats_gcloud_default() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new();
        let env = env_of(&[]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);
        let mut config = Config::default();
        config.target.project_id = Some("  config-project ".into());

        let project = preflight.resolve_project(&config, None).await.expect("resolved");
        assert_eq!(project, "config-project");
        assert_eq!(cloud.calls().count("active-project"), 0);
    }

    #[tokio::test]
    async fn falls_back_to_gcloud_default() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new();
        let env = env_of(&[]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);

        let project = preflight
            .resolve_project(&Config::default(), None)
            .await
            .expect("resolved");
        assert_eq!(project, "gcloud-project");
    }

    #[tokio::test]
    async fn no_project_anywhere_is_precondition_error() {
        let cloud = FakeCloud::new();
        let cluster = FakeCluster::new();
        let env = env_of(&[]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);

        let result = preflight.resolve_project(&Config::default(), None).await;
        assert!(matches!(
            result,
            Err(Error::Precondition(PreconditionError::ProjectUnresolved))
        ));
    }

    #[tokio::test]
    async fn missing_static_address_stops_before_cluster_check() {
        let cloud = FakeCloud::new();
        let cluster = FakeCluster::new();
        let env = env_of(&[]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);

        let result = preflight.run(&Config::default(), Some("demo")).await;
        assert!(matches!(
            result,
            Err(Error::Precondition(PreconditionError::StaticAddressMissing { .. }))
        ));
        assert!(cluster.calls().is_empty());
    }

    #[tokio::test]
    async fn unreachable_cluster_fails_preflight() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new().unreachable("Unable to connect to the server");
        let env = env_of(&[]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);

        let result = preflight.run(&Config::default(), Some("demo")).await;
        assert!(matches!(
            result,
            Err(Error::Precondition(PreconditionError::ClusterUnreachable(_)))
        ));
    }

    #[tokio::test]
    async fn report_carries_target_and_address() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new();
        let env = env_of(&[]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);

        let report = preflight
            .run(&Config::default(), Some("demo"))
            .await
            .expect("preflight passes");
        assert_eq!(report.target.project_id(), "demo");
        assert_eq!(report.target.namespace(), "apartment");
        assert_eq!(report.static_address, "34.120.0.1");
        assert!(report.cluster.contains("control plane"));
        assert!(report.seed_secret.is_none());
        assert_eq!(cloud.calls().all(), ["static-address demo apartment-ip"]);
    }

    #[tokio::test]
    async fn seed_secret_requires_every_key() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new();
        let env = env_of(&[("SEED_USER", "admin")]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);
        let mut config = Config::default();
        config.secrets.enabled = true;
        config.secrets.keys = vec!["SEED_USER".into(), "SEED_PASSWORD".into()];

        match preflight.run(&config, Some("demo")).await {
            Err(Error::Precondition(PreconditionError::SeedVariableMissing(key))) => {
                assert_eq!(key, "SEED_PASSWORD");
            }
            other => panic!("expected missing seed variable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn seed_secret_collects_values_in_order() {
        let cloud = healthy_cloud();
        let cluster = FakeCluster::new();
        let env = env_of(&[("SEED_USER", "admin"), ("SEED_PASSWORD", "hunter2")]);
        let preflight = Preflight::new(&cloud, &cluster, &NullNotifier, &env);
        let mut config = Config::default();
        config.secrets.enabled = true;
        config.secrets.keys = vec!["SEED_USER".into(), "SEED_PASSWORD".into()];

        let report = preflight.run(&config, Some("demo")).await.expect("preflight passes");
        let secret = report.seed_secret.expect("secret collected");
        assert_eq!(secret.name, config.secrets.name);
        assert_eq!(secret.keys().collect::<Vec<_>>(), ["SEED_USER", "SEED_PASSWORD"]);
    }
}
