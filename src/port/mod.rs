//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Every external tool the rollout touches sits behind one of these traits,
//! so the application layer can be driven against scripted fakes.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │ preflight → build → patch│
//!                 │   → apply → report       │
//!                 └────────────┬─────────────┘
//!        ┌─────────────────────┼──────────────────────┐
//!        ▼                     ▼                      ▼
//!  ┌────────────┐       ┌─────────────┐        ┌─────────────┐
//!  │ CloudPlat. │       │ClusterClient│        │ImageBuilder │
//!  │  (gcloud)  │       │  (kubectl)  │        │(docker/gcb) │
//!  └─────┬──────┘       └──────┬──────┘        └──────┬──────┘
//!        └─────────────────────┼──────────────────────┘
//!                              ▼
//!                       CommandRunner
//! ```
//!
//! # Available Ports
//!
//! - [`CommandRunner`] - Runs one external program to completion
//! - [`ClusterClient`] - Applies manifests, waits on readiness, reads status
//! - [`CloudPlatform`] - Project detection and static address lookup
//! - [`ImageBuilder`] - Builds and pushes one container image
//! - [`Notifier`] - Progress events for whoever is watching the run
//!
//! The operator surface the CLI drives lives under [`inbound`]; everything
//! above sits under [`outbound`] and is re-exported here.

pub mod inbound;
pub mod outbound;

pub use outbound::builder::{BuilderFactory, ImageBuilder};
pub use outbound::cloud::CloudPlatform;
pub use outbound::cluster::ClusterClient;
pub use outbound::command::{CommandOutput, CommandRunner, Invocation};
pub use outbound::notifier::{Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier};
