//! Deployment domain types.
//!
//! Plain values resolved once per run: the target being deployed to, the
//! image references being rolled out, the ordered stages, the summary
//! reported at the end and the results preflight and patching hand back.
//! Nothing here talks to external tools.

mod image;
mod manifest;
mod preflight;
mod stage;
mod summary;
mod target;

pub use image::{BuildStrategy, ImageReference, ImageRole, ImageSpec};
pub use manifest::PatchOutcome;
pub use preflight::{PreflightReport, SeedSecret};
pub use stage::{ReadinessGate, Stage, StageKind};
pub use summary::{CertificateStatus, DeploymentSummary};
pub use target::DeploymentTarget;
