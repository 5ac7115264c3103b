//! Inbound operator accessor for CLI handlers.

use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ConfigError, Error, Result};
use crate::port::inbound::operator::port::OperatorPort;

static OPERATOR: OnceLock<Box<dyn OperatorPort>> = OnceLock::new();

/// Installs the operator implementation used by CLI handlers.
pub fn install(operator: Box<dyn OperatorPort>) -> std::result::Result<(), Box<dyn OperatorPort>> {
    OPERATOR.set(operator)
}

/// Returns the installed operator.
pub fn operator() -> Result<&'static dyn OperatorPort> {
    OPERATOR
        .get()
        .map(|operator| &**operator)
        .ok_or_else(|| ConfigError::Other("operator not installed".into()).into())
}

/// Read the configuration file, pointing at `config init` when it is absent.
pub fn read_config_toml(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::from(ConfigError::Other(format!(
                "{} not found (run `deployctl config init` to create it)",
                path.display()
            )))
        } else {
            ConfigError::ReadFile(err).into()
        }
    })
}
