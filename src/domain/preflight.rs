//! What preflight establishes before anything changes.

use std::fmt;

use super::DeploymentTarget;

/// Seed credentials destined for a Kubernetes `Secret`.
///
/// `Debug` lists keys only.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedSecret {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl SeedSecret {
    /// Variable names, in configured order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl fmt::Debug for SeedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.keys().collect();
        f.debug_struct("SeedSecret")
            .field("name", &self.name)
            .field("keys", &keys)
            .finish()
    }
}

/// Everything preflight established.
#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub target: DeploymentTarget,
    pub static_address: String,
    /// One-line description of the control plane that answered.
    pub cluster: String,
    pub seed_secret: Option<SeedSecret>,
}
