//! Outbound adapters: the external tools behind each port.

pub mod docker;
pub mod gcloud;
pub mod kubectl;
pub mod process;

pub use docker::LocalDockerBuilder;
pub use gcloud::{CloudBuildBuilder, GcloudPlatform};
pub use kubectl::KubectlClient;
pub use process::ProcessRunner;
