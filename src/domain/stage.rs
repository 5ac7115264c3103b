use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// The fixed stages of a rollout, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Namespace,
    Secrets,
    Database,
    Backend,
    Frontend,
    Certificate,
    Ingress,
}

impl StageKind {
    /// Every stage in apply order.
    pub const ORDER: [StageKind; 7] = [
        StageKind::Namespace,
        StageKind::Secrets,
        StageKind::Database,
        StageKind::Backend,
        StageKind::Frontend,
        StageKind::Certificate,
        StageKind::Ingress,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StageKind::Namespace => "namespace",
            StageKind::Secrets => "secrets",
            StageKind::Database => "database",
            StageKind::Backend => "backend",
            StageKind::Frontend => "frontend",
            StageKind::Certificate => "certificate",
            StageKind::Ingress => "ingress",
        }
    }

    /// Workload stages run pods and are followed by a readiness wait.
    #[must_use]
    pub const fn is_workload(self) -> bool {
        matches!(
            self,
            StageKind::Database | StageKind::Backend | StageKind::Frontend
        )
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking wait until every pod matching `selector` in `namespace` is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessGate {
    pub selector: String,
    pub namespace: String,
    pub timeout: Duration,
}

impl ReadinessGate {
    #[must_use]
    pub fn new(selector: impl Into<String>, namespace: impl Into<String>, timeout: Duration) -> Self {
        Self {
            selector: selector.into(),
            namespace: namespace.into(),
            timeout,
        }
    }
}

/// One step of the rollout: manifests to apply and an optional gate after them.
///
/// The secrets stage carries no manifest files; its manifest is rendered at
/// apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub kind: StageKind,
    pub manifests: Vec<PathBuf>,
    pub gate: Option<ReadinessGate>,
}

impl Stage {
    #[must_use]
    pub fn new(kind: StageKind, manifests: Vec<PathBuf>) -> Self {
        Self {
            kind,
            manifests,
            gate: None,
        }
    }

    #[must_use]
    pub fn with_gate(mut self, gate: ReadinessGate) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_dependency_order() {
        let mut sorted = StageKind::ORDER;
        sorted.sort();
        assert_eq!(sorted, StageKind::ORDER);
        assert_eq!(StageKind::ORDER.first(), Some(&StageKind::Namespace));
        assert_eq!(StageKind::ORDER.last(), Some(&StageKind::Ingress));
    }

    #[test]
    fn only_pod_stages_are_workloads() {
        let workloads: Vec<_> = StageKind::ORDER
            .iter()
            .copied()
            .filter(|kind| kind.is_workload())
            .collect();
        assert_eq!(
            workloads,
            vec![StageKind::Database, StageKind::Backend, StageKind::Frontend]
        );
    }
}
