//! Unified operator capability surface for inbound adapters.

use super::configuration::ConfigurationOperator;
use super::deployment::DeploymentOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: ConfigurationOperator + DeploymentOperator {}

impl<T> OperatorPort for T where T: ConfigurationOperator + DeploymentOperator {}
