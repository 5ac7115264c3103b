//! deployctl - build, patch, apply and report a two-tier Kubernetes rollout.
//!
//! Deploys a frontend and a backend container plus their database onto a
//! managed Kubernetes cluster that sits behind a reserved static address
//! and a managed TLS certificate.
//!
//! # Architecture
//!
//! Ports and adapters. The rollout itself lives in [`application`] and only
//! talks to the outside world through the traits in [`port`]:
//!
//! - **Preflight** - resolve the project, verify the static address and the
//!   cluster connection before anything changes
//! - **Image provisioning** - `docker build` + `docker push`, or
//!   `gcloud builds submit`
//! - **Manifest patching** - rewrite `image:` fields to the resolved tags
//! - **Cluster apply** - namespace → database → backend → frontend →
//!   certificate → ingress, with readiness waits between workloads
//! - **Status report** - ingress address and certificate state
//!
//! # Modules
//!
//! - [`adapter`] - CLI and the `gcloud` / `kubectl` / `docker` adapters
//! - [`application`] - The deployment use-cases
//! - [`domain`] - Targets, images, stages and summaries
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Configuration, wiring and the operator behind the CLI
//! - [`port`] - Trait definitions between the layers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use deployctl::application::DeployPipeline;
//! use deployctl::infrastructure::bootstrap;
//! use deployctl::infrastructure::config::Config;
//! use deployctl::port::inbound::operator::deployment::DeployRequest;
//! use deployctl::port::LogNotifier;
//!
//! # async fn run() -> deployctl::error::Result<()> {
//! let config = Config::load("deploy.toml")?;
//! let services = bootstrap::build_services(Arc::new(LogNotifier));
//! let outcome = DeployPipeline::new(&config, services)
//!     .deploy(&DeployRequest {
//!         build: true,
//!         report_status: true,
//!         ..DeployRequest::default()
//!     })
//!     .await?;
//! println!("deployed to {}", outcome.target);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
