use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Provisioning state of the managed TLS certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "raw", rename_all = "snake_case")]
pub enum CertificateStatus {
    Active,
    Provisioning,
    FailedNotVisible,
    /// Reported by the cluster but not one of the known states.
    Unknown(String),
    /// The certificate resource does not exist or has no status yet.
    Missing,
}

impl CertificateStatus {
    /// Interpret the raw `status.certificateStatus` value.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" => CertificateStatus::Missing,
            "Active" => CertificateStatus::Active,
            "Provisioning" => CertificateStatus::Provisioning,
            "FailedNotVisible" => CertificateStatus::FailedNotVisible,
            other => CertificateStatus::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, CertificateStatus::Active)
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateStatus::Active => f.write_str("Active"),
            CertificateStatus::Provisioning => f.write_str("Provisioning"),
            CertificateStatus::FailedNotVisible => f.write_str("FailedNotVisible"),
            CertificateStatus::Unknown(raw) => write!(f, "{raw} (unrecognized)"),
            CertificateStatus::Missing => f.write_str("not reported"),
        }
    }
}

/// What the cluster reports once the rollout is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentSummary {
    pub static_address: Option<String>,
    pub external_address: Option<String>,
    pub certificate: CertificateStatus,
    pub url: String,
    pub reported_at: DateTime<Utc>,
}

impl DeploymentSummary {
    /// True when the ingress has picked up the reserved static address.
    #[must_use]
    pub fn address_matches(&self) -> bool {
        match (&self.static_address, &self.external_address) {
            (Some(expected), Some(observed)) => expected == observed,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(static_address: Option<&str>, external: Option<&str>) -> DeploymentSummary {
        DeploymentSummary {
            static_address: static_address.map(str::to_string),
            external_address: external.map(str::to_string),
            certificate: CertificateStatus::Provisioning,
            url: "https://app.example.com".into(),
            reported_at: Utc::now(),
        }
    }

    #[test]
    fn certificate_status_parses_known_states() {
        assert_eq!(CertificateStatus::from_raw("Active"), CertificateStatus::Active);
        assert_eq!(
            CertificateStatus::from_raw(" Provisioning\n"),
            CertificateStatus::Provisioning
        );
        assert_eq!(
            CertificateStatus::from_raw("FailedNotVisible"),
            CertificateStatus::FailedNotVisible
        );
        assert_eq!(CertificateStatus::from_raw(""), CertificateStatus::Missing);
        assert_eq!(
            CertificateStatus::from_raw("Renewing"),
            CertificateStatus::Unknown("Renewing".into())
        );
    }

    #[test]
    fn address_match_requires_both_sides() {
        assert!(summary(Some("34.1.2.3"), Some("34.1.2.3")).address_matches());
        assert!(!summary(Some("34.1.2.3"), Some("35.9.9.9")).address_matches());
        assert!(!summary(Some("34.1.2.3"), None).address_matches());
        assert!(!summary(None, Some("34.1.2.3")).address_matches());
    }
}
