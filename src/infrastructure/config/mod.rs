//! Infrastructure configuration modules.

pub mod images;
pub mod logging;
pub mod manifests;
pub mod readiness;
pub mod secrets;
pub mod settings;
pub mod status;
pub mod target;

pub use settings::{Config, PROJECT_ENV};
