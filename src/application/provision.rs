//! Image provisioning: build and push both application images.

use tracing::info;

use crate::domain::{ImageReference, ImageSpec};
use crate::error::Result;
use crate::port::{Event, ImageBuilder, Notifier};

/// Builds images one after another with a single strategy.
pub struct ImageProvisioner<'a> {
    builder: &'a dyn ImageBuilder,
    notifier: &'a dyn Notifier,
}

impl<'a> ImageProvisioner<'a> {
    pub fn new(builder: &'a dyn ImageBuilder, notifier: &'a dyn Notifier) -> Self {
        Self { builder, notifier }
    }

    /// Build and push each `(spec, reference)` pair in order.
    ///
    /// The first failure aborts; images already pushed stay pushed.
    pub async fn provision(
        &self,
        registry: &str,
        images: &[(ImageSpec, ImageReference)],
    ) -> Result<()> {
        info!(strategy = %self.builder.strategy(), count = images.len(), "Provisioning images");
        self.builder.prepare(registry).await?;

        for (spec, reference) in images {
            self.notifier.notify(Event::BuildStarted {
                role: spec.role,
                reference: reference.clone(),
            });
            self.builder.build_and_push(spec, reference).await?;
            self.notifier.notify(Event::BuildFinished {
                role: spec.role,
                reference: reference.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::{BuildStrategy, ImageRole};
    use crate::port::NullNotifier;
    use crate::testkit::fakes::FakeBuilder;

    fn image(role: ImageRole, name: &str) -> (ImageSpec, ImageReference) {
        let spec = ImageSpec {
            role,
            name: name.into(),
            context: role.as_str().into(),
            dockerfile: format!("{}/Dockerfile", role.as_str()).into(),
        };
        let reference = spec.reference("gcr.io", "demo", "prod").expect("valid");
        (spec, reference)
    }

    fn images() -> [(ImageSpec, ImageReference); 2] {
        [
            image(ImageRole::Backend, "api"),
            image(ImageRole::Frontend, "web"),
        ]
    }

    #[tokio::test]
    async fn builds_in_given_order_after_prepare() {
        let builder = FakeBuilder::new(BuildStrategy::Local);
        let provisioner = ImageProvisioner::new(&builder, &NullNotifier);

        provisioner.provision("gcr.io", &images()).await.expect("provisioned");

        assert_eq!(
            builder.calls().all(),
            [
                "prepare gcr.io",
                "build gcr.io/demo/api:prod",
                "build gcr.io/demo/web:prod",
            ]
        );
    }

    #[tokio::test]
    async fn first_failure_stops_remaining_builds() {
        let builder = FakeBuilder::new(BuildStrategy::Remote).fail_on("gcr.io/demo/api:prod");
        let provisioner = ImageProvisioner::new(&builder, &NullNotifier);

        assert!(provisioner.provision("gcr.io", &images()).await.is_err());
        assert_eq!(builder.calls().count("build gcr.io/demo/web:prod"), 0);
    }
}
