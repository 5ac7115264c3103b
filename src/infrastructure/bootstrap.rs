//! Composition root: wires the process-backed adapters into [`Services`].

use std::sync::Arc;

use crate::adapter::outbound::{
    CloudBuildBuilder, GcloudPlatform, KubectlClient, LocalDockerBuilder, ProcessRunner,
};
use crate::application::preflight::process_env;
use crate::application::Services;
use crate::domain::BuildStrategy;
use crate::port::{BuilderFactory, CommandRunner, ImageBuilder, Notifier};

/// Builders backed by the local toolchain (`docker`) or Cloud Build (`gcloud`).
pub struct ToolchainBuilders {
    runner: Arc<dyn CommandRunner>,
}

impl ToolchainBuilders {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl BuilderFactory for ToolchainBuilders {
    fn builder(&self, strategy: BuildStrategy, project: &str) -> Box<dyn ImageBuilder> {
        match strategy {
            BuildStrategy::Local => Box::new(LocalDockerBuilder::new(Arc::clone(&self.runner))),
            BuildStrategy::Remote => {
                Box::new(CloudBuildBuilder::new(Arc::clone(&self.runner), project))
            }
        }
    }
}

/// Services driving real `gcloud`, `kubectl` and `docker` processes.
pub fn build_services(notifier: Arc<dyn Notifier>) -> Services {
    services_with_runner(Arc::new(ProcessRunner::new()), notifier)
}

/// Services over an arbitrary runner, reading the process environment.
pub fn services_with_runner(runner: Arc<dyn CommandRunner>, notifier: Arc<dyn Notifier>) -> Services {
    Services {
        cloud: Arc::new(GcloudPlatform::new(Arc::clone(&runner))),
        cluster: Arc::new(KubectlClient::new(Arc::clone(&runner))),
        builders: Arc::new(ToolchainBuilders::new(runner)),
        notifier,
        env: Arc::new(process_env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::runner::ScriptedRunner;

    #[test]
    fn factory_honours_strategy() {
        let builders = ToolchainBuilders::new(Arc::new(ScriptedRunner::new()));
        assert_eq!(
            builders.builder(BuildStrategy::Local, "demo").strategy(),
            BuildStrategy::Local
        );
        assert_eq!(
            builders.builder(BuildStrategy::Remote, "demo").strategy(),
            BuildStrategy::Remote
        );
    }
}
