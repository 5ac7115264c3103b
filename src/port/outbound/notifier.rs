//! Notifier port for rollout progress.
//!
//! The application layer reports what it is doing through this trait;
//! the CLI renders it, tests record it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::{ImageReference, ImageRole, ReadinessGate, StageKind};

/// Progress events emitted during a run.
#[derive(Debug, Clone)]
pub enum Event {
    /// The project was chosen; `source` says where it came from.
    ProjectResolved { project: String, source: &'static str },
    /// The reserved static address exists.
    StaticAddressVerified { name: String, address: String },
    /// The cluster answered.
    ClusterConnected { description: String },
    /// An image build started.
    BuildStarted {
        role: ImageRole,
        reference: ImageReference,
    },
    /// An image is built and pushed.
    BuildFinished {
        role: ImageRole,
        reference: ImageReference,
    },
    /// A manifest was scanned for an image reference.
    ManifestPatched {
        path: PathBuf,
        replaced: usize,
        changed: bool,
    },
    /// A stage began.
    StageStarted { stage: StageKind },
    /// One manifest of a stage was applied.
    ManifestApplied { stage: StageKind, manifest: String },
    /// A readiness wait began.
    WaitStarted {
        stage: StageKind,
        gate: ReadinessGate,
    },
    /// A readiness wait succeeded.
    WaitFinished { stage: StageKind, elapsed: Duration },
    /// A stage finished successfully.
    StageCompleted { stage: StageKind },
    /// A stage aborted the run.
    StageFailed { stage: StageKind, reason: String },
    /// Pausing before the status poll.
    Settling { delay: Duration },
}

/// Trait for progress sinks.
///
/// Called synchronously from the pipeline; implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, event: Event) {
        (**self).notify(event);
    }
}

/// Broadcasts events to every registered notifier.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

/// A notifier that drops every event.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A notifier that turns events into log lines.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::ProjectResolved { project, source } => {
                info!(project = %project, source, "Project resolved");
            }
            Event::StaticAddressVerified { name, address } => {
                info!(name = %name, address = %address, "Static address verified");
            }
            Event::ClusterConnected { description } => {
                info!(cluster = %description, "Cluster reachable");
            }
            Event::BuildStarted { role, reference } => {
                info!(image = %role, reference = %reference, "Build started");
            }
            Event::BuildFinished { role, reference } => {
                info!(image = %role, reference = %reference, "Image pushed");
            }
            Event::ManifestPatched {
                path,
                replaced,
                changed,
            } => {
                if replaced == 0 {
                    warn!(manifest = %path.display(), "No image reference matched");
                } else {
                    info!(manifest = %path.display(), replaced, changed, "Manifest patched");
                }
            }
            Event::StageStarted { stage } => info!(stage = %stage, "Stage started"),
            Event::ManifestApplied { stage, manifest } => {
                info!(stage = %stage, manifest = %manifest, "Applied");
            }
            Event::WaitStarted { stage, gate } => {
                info!(
                    stage = %stage,
                    selector = %gate.selector,
                    timeout_secs = gate.timeout.as_secs(),
                    "Waiting for readiness"
                );
            }
            Event::WaitFinished { stage, elapsed } => {
                info!(stage = %stage, elapsed_ms = elapsed.as_millis() as u64, "Ready");
            }
            Event::StageCompleted { stage } => info!(stage = %stage, "Stage completed"),
            Event::StageFailed { stage, reason } => {
                warn!(stage = %stage, reason = %reason, "Stage failed");
            }
            Event::Settling { delay } => {
                info!(delay_secs = delay.as_secs(), "Settling before status poll");
            }
        }
    }
}
