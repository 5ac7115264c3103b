//! Cluster applier: the ordered rollout state machine.
//!
//! Stages run strictly in sequence. A stage applies its manifests, then
//! waits on its readiness gate if it has one; only then does the next stage
//! start. The first failure stops the run. Nothing already applied is
//! rolled back.

use std::time::Instant;

use tracing::info_span;
use tracing::Instrument;

use crate::domain::{SeedSecret, Stage, StageKind};
use crate::error::Result;
use crate::port::{ClusterClient, Event, Notifier};

/// Applies a rollout plan to the cluster.
pub struct ClusterApplier<'a> {
    cluster: &'a dyn ClusterClient,
    notifier: &'a dyn Notifier,
}

impl<'a> ClusterApplier<'a> {
    pub fn new(cluster: &'a dyn ClusterClient, notifier: &'a dyn Notifier) -> Self {
        Self { cluster, notifier }
    }

    /// Run every stage in order; returns the stages that completed.
    pub async fn apply(
        &self,
        namespace: &str,
        stages: &[Stage],
        seed_secret: Option<&SeedSecret>,
    ) -> Result<Vec<StageKind>> {
        let mut completed = Vec::with_capacity(stages.len());
        for stage in stages {
            let span = info_span!("stage", stage = %stage.kind);
            match self
                .run_stage(namespace, stage, seed_secret)
                .instrument(span)
                .await
            {
                Ok(()) => {
                    self.notifier
                        .notify(Event::StageCompleted { stage: stage.kind });
                    completed.push(stage.kind);
                }
                Err(err) => {
                    self.notifier.notify(Event::StageFailed {
                        stage: stage.kind,
                        reason: err.to_string(),
                    });
                    return Err(err.in_stage(stage.kind.as_str()));
                }
            }
        }
        Ok(completed)
    }

    async fn run_stage(
        &self,
        namespace: &str,
        stage: &Stage,
        seed_secret: Option<&SeedSecret>,
    ) -> Result<()> {
        self.notifier.notify(Event::StageStarted { stage: stage.kind });

        if stage.kind == StageKind::Secrets {
            if let Some(secret) = seed_secret {
                let manifest = self
                    .cluster
                    .render_secret(&secret.name, namespace, &secret.entries)
                    .await?;
                self.cluster.apply_manifest(&manifest).await?;
                self.notifier.notify(Event::ManifestApplied {
                    stage: stage.kind,
                    manifest: format!("secret/{}", secret.name),
                });
            }
        }

        for path in &stage.manifests {
            self.cluster.apply_file(path).await?;
            self.notifier.notify(Event::ManifestApplied {
                stage: stage.kind,
                manifest: path.display().to_string(),
            });
        }

        if let Some(gate) = &stage.gate {
            self.notifier.notify(Event::WaitStarted {
                stage: stage.kind,
                gate: gate.clone(),
            });
            let started = Instant::now();
            self.cluster.wait_ready(gate).await?;
            self.notifier.notify(Event::WaitFinished {
                stage: stage.kind,
                elapsed: started.elapsed(),
            });
        }
        Ok(())
    }
}
