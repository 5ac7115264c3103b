//! Deployment target configuration.

use serde::Deserialize;

/// Where the application is deployed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Cloud project; detected from the gcloud default when unset.
    pub project_id: Option<String>,
    /// Public DNS name served by the ingress.
    pub domain: String,
    /// Kubernetes namespace every namespaced manifest lands in.
    pub namespace: String,
    /// Name of the reserved global static address.
    pub static_ip_name: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            domain: "apartment.example.com".into(),
            namespace: "apartment".into(),
            static_ip_name: "apartment-ip".into(),
        }
    }
}
