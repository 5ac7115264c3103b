//! Post-rollout status report configuration.

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Pause before the single status poll, in seconds.
    pub settle_secs: u64,
    /// Ingress whose external address is reported.
    pub ingress: String,
    /// Managed certificate whose provisioning state is reported.
    pub certificate: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            settle_secs: 30,
            ingress: "apartment-ingress".into(),
            certificate: "apartment-cert".into(),
        }
    }
}

impl StatusConfig {
    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }
}
