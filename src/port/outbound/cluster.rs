//! Cluster control-plane port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{CertificateStatus, ReadinessGate};
use crate::error::Result;

#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Confirm the control plane answers; returns a one-line description of it.
    async fn check_connection(&self) -> Result<String>;

    /// Apply one manifest file.
    async fn apply_file(&self, path: &Path) -> Result<()>;

    /// Apply manifest text passed on stdin.
    async fn apply_manifest(&self, manifest: &str) -> Result<()>;

    /// Render (without applying) a generic `Secret` holding `entries`.
    async fn render_secret(
        &self,
        name: &str,
        namespace: &str,
        entries: &[(String, String)],
    ) -> Result<String>;

    /// Block until the gate's pods report ready or its timeout elapses.
    async fn wait_ready(&self, gate: &ReadinessGate) -> Result<()>;

    /// First external address assigned to an ingress, if any yet.
    async fn ingress_address(&self, namespace: &str, ingress: &str) -> Result<Option<String>>;

    /// Provisioning state of a managed certificate.
    async fn certificate_status(
        &self,
        namespace: &str,
        certificate: &str,
    ) -> Result<CertificateStatus>;
}
