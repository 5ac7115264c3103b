//! Readiness gate configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::StageKind;

/// Label selectors waited on after each workload stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Upper bound on each wait, in seconds.
    pub timeout_secs: u64,
    pub database: String,
    pub backend: String,
    pub frontend: String,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            database: "app=postgres".into(),
            backend: "app=backend".into(),
            frontend: "app=frontend".into(),
        }
    }
}

impl ReadinessConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Selector gating `stage`, or `None` for stages without pods.
    #[must_use]
    pub fn selector(&self, stage: StageKind) -> Option<&str> {
        match stage {
            StageKind::Database => Some(&self.database),
            StageKind::Backend => Some(&self.backend),
            StageKind::Frontend => Some(&self.frontend),
            _ => None,
        }
    }
}
