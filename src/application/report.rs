//! Post-rollout status report.
//!
//! One poll after one fixed pause. A certificate that is still provisioning
//! is part of the report, not a failure.

use std::time::Duration;

use chrono::Utc;

use crate::domain::{DeploymentSummary, DeploymentTarget};
use crate::error::Result;
use crate::port::{ClusterClient, Event, Notifier};

/// Which cluster objects the report reads.
#[derive(Debug, Clone)]
pub struct ReportRequest<'r> {
    pub target: &'r DeploymentTarget,
    /// Address verified during preflight, if known.
    pub static_address: Option<String>,
    pub ingress: &'r str,
    pub certificate: &'r str,
    pub settle: Duration,
}

pub struct StatusReporter<'a> {
    cluster: &'a dyn ClusterClient,
    notifier: &'a dyn Notifier,
}

impl<'a> StatusReporter<'a> {
    pub fn new(cluster: &'a dyn ClusterClient, notifier: &'a dyn Notifier) -> Self {
        Self { cluster, notifier }
    }

    pub async fn report(&self, request: ReportRequest<'_>) -> Result<DeploymentSummary> {
        if !request.settle.is_zero() {
            self.notifier.notify(Event::Settling {
                delay: request.settle,
            });
            tokio::time::sleep(request.settle).await;
        }

        let namespace = request.target.namespace();
        let external_address = self
            .cluster
            .ingress_address(namespace, request.ingress)
            .await?;
        let certificate = self
            .cluster
            .certificate_status(namespace, request.certificate)
            .await?;

        Ok(DeploymentSummary {
            static_address: request.static_address,
            external_address,
            certificate,
            url: request.target.public_url(),
            reported_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::CertificateStatus;
    use crate::port::NullNotifier;
    use crate::testkit::fakes::FakeCluster;

    fn target() -> DeploymentTarget {
        DeploymentTarget::new("demo", "app.example.com", "apartment", "app-ip")
    }

    fn request(target: &DeploymentTarget, settle: Duration) -> ReportRequest<'_> {
        ReportRequest {
            target,
            static_address: Some("34.120.0.1".into()),
            ingress: "web",
            certificate: "web-cert",
            settle,
        }
    }

    #[tokio::test]
    async fn stabilized_ingress_matches_static_address() {
        let cluster = FakeCluster::new()
            .with_ingress_address("34.120.0.1")
            .with_certificate(CertificateStatus::Active);
        let target = target();

        let summary = StatusReporter::new(&cluster, &NullNotifier)
            .report(request(&target, Duration::ZERO))
            .await
            .expect("report");

        assert!(summary.address_matches());
        assert!(summary.certificate.is_active());
        assert_eq!(summary.url, "https://app.example.com");
    }

    #[tokio::test]
    async fn pending_certificate_is_reported_not_raised() {
        let cluster = FakeCluster::new().with_certificate(CertificateStatus::Provisioning);
        let target = target();

        let summary = StatusReporter::new(&cluster, &NullNotifier)
            .report(request(&target, Duration::ZERO))
            .await
            .expect("report");

        assert_eq!(summary.external_address, None);
        assert_eq!(summary.certificate, CertificateStatus::Provisioning);
        assert!(!summary.address_matches());
    }

    #[tokio::test]
    async fn polls_once_after_settle() {
        let cluster = FakeCluster::new();
        let target = target();
        let started = std::time::Instant::now();

        StatusReporter::new(&cluster, &NullNotifier)
            .report(request(&target, Duration::from_millis(50)))
            .await
            .expect("report");

        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(
            cluster.calls().all(),
            ["ingress apartment web", "certificate apartment web-cert"]
        );
    }
}
