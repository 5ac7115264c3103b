//! Port-level fakes for driving application services directly.
//!
//! Where [`ScriptedRunner`](super::runner::ScriptedRunner) sits under the
//! real adapters, these stand in for the adapters themselves. Each fake
//! records what it was asked to do as a short line (`"apply k8s/ns.yaml"`,
//! `"wait app=backend"`) so tests can assert on order without spelling out
//! tool arguments.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{BuildStrategy, CertificateStatus, ImageReference, ImageSpec, ReadinessGate};
use crate::error::{CommandError, Error, PreconditionError, Result};
use crate::port::{CloudPlatform, ClusterClient, ImageBuilder};

/// Ordered record of calls made to a fake.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<Vec<String>>,
}

impl CallLog {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    /// Snapshot of every call so far, in order.
    pub fn all(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Index of the first call starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls.lock().iter().position(|call| call.starts_with(prefix))
    }

    /// Number of calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

fn failed(command: String, stderr: &str) -> Error {
    CommandError::Failed {
        command,
        code: 1,
        stderr: stderr.to_string(),
    }
    .into()
}

/// Cloud project with a fixed default project and static address.
#[derive(Debug, Default)]
pub struct FakeCloud {
    active_project: Option<String>,
    static_address: Option<String>,
    calls: CallLog,
}

impl FakeCloud {
    /// No default project and no reserved address.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active_project(mut self, project: &str) -> Self {
        self.active_project = Some(project.to_string());
        self
    }

    pub fn with_static_address(mut self, address: &str) -> Self {
        self.static_address = Some(address.to_string());
        self
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

#[async_trait]
impl CloudPlatform for FakeCloud {
    async fn active_project(&self) -> Result<Option<String>> {
        self.calls.record("active-project");
        Ok(self.active_project.clone())
    }

    async fn static_address(&self, project: &str, name: &str) -> Result<Option<String>> {
        self.calls.record(format!("static-address {project} {name}"));
        Ok(self.static_address.clone())
    }
}

/// Cluster that accepts every manifest unless told otherwise.
#[derive(Debug)]
pub struct FakeCluster {
    connection: std::result::Result<String, String>,
    failing_selector: Option<String>,
    ingress_address: Option<String>,
    certificate: CertificateStatus,
    applied_manifests: Mutex<Vec<String>>,
    calls: CallLog,
}

impl Default for FakeCluster {
    fn default() -> Self {
        Self {
            connection: Ok("Kubernetes control plane is running at https://10.0.0.1".into()),
            failing_selector: None,
            ingress_address: None,
            certificate: CertificateStatus::Missing,
            applied_manifests: Mutex::new(Vec::new()),
            calls: CallLog::default(),
        }
    }
}

impl FakeCluster {
    /// Reachable, with no ingress address and no certificate yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// `check_connection` fails with `reason`.
    pub fn unreachable(mut self, reason: &str) -> Self {
        self.connection = Err(reason.to_string());
        self
    }

    /// Readiness waits on `selector` time out.
    pub fn fail_wait_on(mut self, selector: &str) -> Self {
        self.failing_selector = Some(selector.to_string());
        self
    }

    pub fn with_ingress_address(mut self, address: &str) -> Self {
        self.ingress_address = Some(address.to_string());
        self
    }

    pub fn with_certificate(mut self, status: CertificateStatus) -> Self {
        self.certificate = status;
        self
    }

    /// Manifest text applied through `apply_manifest`, in order.
    pub fn applied_manifests(&self) -> Vec<String> {
        self.applied_manifests.lock().clone()
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn check_connection(&self) -> Result<String> {
        self.calls.record("cluster-info");
        self.connection
            .clone()
            .map_err(|reason| PreconditionError::ClusterUnreachable(reason).into())
    }

    async fn apply_file(&self, path: &Path) -> Result<()> {
        self.calls.record(format!("apply {}", path.display()));
        Ok(())
    }

    async fn apply_manifest(&self, manifest: &str) -> Result<()> {
        self.calls.record("apply -");
        self.applied_manifests.lock().push(manifest.to_string());
        Ok(())
    }

    async fn render_secret(
        &self,
        name: &str,
        namespace: &str,
        entries: &[(String, String)],
    ) -> Result<String> {
        self.calls.record(format!("render-secret {name} {namespace}"));
        let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
        Ok(format!(
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: {name}\n  namespace: {namespace}\n# keys: {}\n",
            keys.join(",")
        ))
    }

    async fn wait_ready(&self, gate: &ReadinessGate) -> Result<()> {
        self.calls.record(format!("wait {}", gate.selector));
        if self.failing_selector.as_deref() == Some(gate.selector.as_str()) {
            return Err(failed(
                format!("wait {}", gate.selector),
                "timed out waiting for the condition",
            ));
        }
        Ok(())
    }

    async fn ingress_address(&self, namespace: &str, ingress: &str) -> Result<Option<String>> {
        self.calls.record(format!("ingress {namespace} {ingress}"));
        Ok(self.ingress_address.clone())
    }

    async fn certificate_status(
        &self,
        namespace: &str,
        certificate: &str,
    ) -> Result<CertificateStatus> {
        self.calls.record(format!("certificate {namespace} {certificate}"));
        Ok(self.certificate.clone())
    }
}

/// Builder that succeeds unless a reference is marked as failing.
#[derive(Debug)]
pub struct FakeBuilder {
    strategy: BuildStrategy,
    failing_reference: Option<String>,
    calls: CallLog,
}

impl FakeBuilder {
    pub fn new(strategy: BuildStrategy) -> Self {
        Self {
            strategy,
            failing_reference: None,
            calls: CallLog::default(),
        }
    }

    /// Building `reference` fails.
    pub fn fail_on(mut self, reference: &str) -> Self {
        self.failing_reference = Some(reference.to_string());
        self
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }
}

#[async_trait]
impl ImageBuilder for FakeBuilder {
    fn strategy(&self) -> BuildStrategy {
        self.strategy
    }

    async fn prepare(&self, registry: &str) -> Result<()> {
        self.calls.record(format!("prepare {registry}"));
        Ok(())
    }

    async fn build_and_push(&self, spec: &ImageSpec, reference: &ImageReference) -> Result<()> {
        let reference = reference.to_string();
        self.calls.record(format!("build {reference}"));
        if self.failing_reference.as_deref() == Some(reference.as_str()) {
            return Err(failed(format!("build {}", spec.name), "build step failed"));
        }
        Ok(())
    }
}
