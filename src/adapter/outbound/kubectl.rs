//! `kubectl`-backed cluster client.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{CertificateStatus, ReadinessGate};
use crate::error::{CommandError, PreconditionError, Result};
use crate::port::{ClusterClient, CommandRunner, Invocation};

const PROGRAM: &str = "kubectl";

/// How long `cluster-info` may take before the cluster counts as unreachable.
const CONNECTION_DEADLINE: Duration = Duration::from_secs(30);

/// Talks to the cluster of the current `kubectl` context.
pub struct KubectlClient {
    runner: Arc<dyn CommandRunner>,
}

impl KubectlClient {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// `kubectl get` a single jsonpath field; a missing object reads as `None`.
    async fn get_field(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
        jsonpath: &str,
    ) -> Result<Option<String>> {
        let invocation = Invocation::new(
            PROGRAM,
            [
                "get".to_string(),
                kind.to_string(),
                name.to_string(),
                "-n".to_string(),
                namespace.to_string(),
                "-o".to_string(),
                format!("jsonpath={jsonpath}"),
            ],
        );
        let output = self.runner.run(&invocation).await?;
        if !output.is_success() && is_not_found(&output.stderr) {
            return Ok(None);
        }
        if !output.is_success() {
            return Err(CommandError::Failed {
                command: invocation.to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(output.value())
    }
}

fn is_not_found(stderr: &str) -> bool {
    stderr.contains("NotFound") || stderr.contains("not found")
}

/// `kubectl wait` arguments for a readiness gate.
pub(crate) fn wait_args(gate: &ReadinessGate) -> Vec<String> {
    vec![
        "wait".to_string(),
        "--for=condition=ready".to_string(),
        "pod".to_string(),
        "-l".to_string(),
        gate.selector.clone(),
        "-n".to_string(),
        gate.namespace.clone(),
        format!("--timeout={}s", gate.timeout.as_secs()),
    ]
}

#[async_trait]
impl ClusterClient for KubectlClient {
    async fn check_connection(&self) -> Result<String> {
        let invocation =
            Invocation::new(PROGRAM, ["cluster-info"]).with_deadline(CONNECTION_DEADLINE);
        let output = match self.runner.run(&invocation).await {
            Ok(output) => output,
            Err(err) => return Err(PreconditionError::ClusterUnreachable(err.to_string()).into()),
        };
        if !output.is_success() {
            let reason = output
                .stderr
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("cluster-info failed")
                .trim()
                .to_string();
            return Err(PreconditionError::ClusterUnreachable(reason).into());
        }
        Ok(output
            .stdout
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    async fn apply_file(&self, path: &Path) -> Result<()> {
        let invocation = Invocation::new(
            PROGRAM,
            ["apply".to_string(), "-f".to_string(), path.display().to_string()],
        );
        let output = self.runner.run_checked(&invocation).await?;
        for line in output.stdout.lines().filter(|line| !line.trim().is_empty()) {
            info!(manifest = %path.display(), "{}", line.trim());
        }
        Ok(())
    }

    async fn apply_manifest(&self, manifest: &str) -> Result<()> {
        let invocation = Invocation::new(PROGRAM, ["apply", "-f", "-"]).with_stdin(manifest);
        self.runner.run_checked(&invocation).await?;
        Ok(())
    }

    async fn render_secret(
        &self,
        name: &str,
        namespace: &str,
        entries: &[(String, String)],
    ) -> Result<String> {
        let mut args = vec![
            "create".to_string(),
            "secret".to_string(),
            "generic".to_string(),
            name.to_string(),
            "-n".to_string(),
            namespace.to_string(),
        ];
        args.extend(
            entries
                .iter()
                .map(|(key, value)| format!("--from-literal={key}={value}")),
        );
        args.extend(["--dry-run=client", "-o", "yaml"].map(String::from));

        let output = self
            .runner
            .run_checked(&Invocation::new(PROGRAM, args).sensitive())
            .await?;
        Ok(output.stdout)
    }

    async fn wait_ready(&self, gate: &ReadinessGate) -> Result<()> {
        let invocation = Invocation::new(PROGRAM, wait_args(gate)).with_deadline(gate.timeout);
        self.runner.run_checked(&invocation).await?;
        Ok(())
    }

    async fn ingress_address(&self, namespace: &str, ingress: &str) -> Result<Option<String>> {
        self.get_field(
            "ingress",
            ingress,
            namespace,
            "{.status.loadBalancer.ingress[0].ip}",
        )
        .await
    }

    async fn certificate_status(
        &self,
        namespace: &str,
        certificate: &str,
    ) -> Result<CertificateStatus> {
        let raw = self
            .get_field(
                "managedcertificate",
                certificate,
                namespace,
                "{.status.certificateStatus}",
            )
            .await?;
        Ok(raw.map_or(CertificateStatus::Missing, |raw| {
            CertificateStatus::from_raw(&raw)
        }))
    }
}
