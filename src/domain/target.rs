use std::fmt;

use serde::Serialize;

/// Where a deployment lands.
///
/// Resolved once before anything is built or applied and never mutated
/// afterwards; fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentTarget {
    project_id: String,
    domain: String,
    namespace: String,
    static_ip_name: String,
}

impl DeploymentTarget {
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        domain: impl Into<String>,
        namespace: impl Into<String>,
        static_ip_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            domain: domain.into(),
            namespace: namespace.into(),
            static_ip_name: static_ip_name.into(),
        }
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn static_ip_name(&self) -> &str {
        &self.static_ip_name
    }

    /// Public URL served once the certificate is active.
    #[must_use]
    pub fn public_url(&self) -> String {
        format!("https://{}", self.domain)
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.project_id, self.namespace, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_uses_https() {
        let target = DeploymentTarget::new("demo", "app.example.com", "apartment", "app-ip");
        assert_eq!(target.public_url(), "https://app.example.com");
    }

    #[test]
    fn display_includes_project_and_namespace() {
        let target = DeploymentTarget::new("demo", "app.example.com", "apartment", "app-ip");
        assert_eq!(target.to_string(), "demo/apartment (app.example.com)");
    }
}
