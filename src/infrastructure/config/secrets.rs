//! Backend seed credential secret.

use serde::Deserialize;

/// Environment variables the backend needs to seed its default users.
pub const DEFAULT_SEED_KEYS: [&str; 9] = [
    "DEFAULT_ADMIN_USERNAME",
    "DEFAULT_ADMIN_PASSWORD",
    "DEFAULT_ADMIN_EMAIL",
    "DEFAULT_VILLAGER_USERNAME",
    "DEFAULT_VILLAGER_PASSWORD",
    "DEFAULT_VILLAGER_EMAIL",
    "DEFAULT_TEST_USERNAME",
    "DEFAULT_TEST_PASSWORD",
    "DEFAULT_TEST_EMAIL",
];

/// Copies selected environment variables into a Kubernetes `Secret`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub enabled: bool,
    /// Secret name referenced by the backend deployment.
    pub name: String,
    /// Environment variables copied verbatim as secret keys.
    pub keys: Vec<String>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: "backend-seed-credentials".into(),
            keys: DEFAULT_SEED_KEYS.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}
