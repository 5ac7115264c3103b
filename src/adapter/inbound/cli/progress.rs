//! Renders rollout events as terminal progress.

use indicatif::ProgressBar;
use parking_lot::Mutex;

use super::output;
use crate::domain::StageKind;
use crate::port::{Event, Notifier};

fn halted(stage: StageKind) -> String {
    format!("{stage} halted")
}

/// Notifier that prints each step and shows a spinner while something
/// long-running (a build or a readiness wait) is in flight.
#[derive(Default)]
pub struct CliNotifier {
    active: Mutex<Option<ProgressBar>>,
}

impl CliNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any spinner still running.
    pub fn clear(&self) {
        if let Some(pb) = self.active.lock().take() {
            pb.finish_and_clear();
        }
    }

    fn start(&self, message: &str) {
        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            previous.finish_and_clear();
        }
        *active = Some(output::spinner(message));
    }

    fn finish(&self, message: &str) {
        match self.active.lock().take() {
            Some(pb) => output::spinner_success(&pb, message),
            None => output::success(message),
        }
    }

    /// Mark a running spinner as failed. The error itself is reported once,
    /// by the caller that receives it.
    fn halt(&self, stage: StageKind) {
        if let Some(pb) = self.active.lock().take() {
            output::spinner_fail(&pb, &halted(stage));
        }
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::ProjectResolved { project, source } => {
                output::field("Project", format!("{project} {}", output::muted(format!("({source})"))));
            }
            Event::StaticAddressVerified { name, address } => {
                output::field("Static IP", format!("{address} {}", output::muted(format!("({name})"))));
            }
            Event::ClusterConnected { description } => {
                output::field("Cluster", description);
            }
            Event::BuildStarted { role, reference } => {
                self.start(&format!("Building {role} image {}", output::highlight(&reference)));
            }
            Event::BuildFinished { role, reference } => {
                self.finish(&format!("Pushed {role} image {reference}"));
            }
            Event::ManifestPatched {
                path,
                replaced,
                changed,
            } => {
                if replaced == 0 {
                    output::warning(&format!("No image reference in {}", path.display()));
                } else if changed {
                    output::action_done("Patched", &path.display().to_string());
                } else {
                    output::note(&format!("{} already up to date", path.display()));
                }
            }
            Event::StageStarted { stage } => output::section(&format!("Stage {stage}")),
            Event::ManifestApplied { manifest, .. } => output::action_done("Applied", &manifest),
            Event::WaitStarted { gate, .. } => {
                self.start(&format!(
                    "Waiting for pods {} (up to {}s)",
                    output::highlight(&gate.selector),
                    gate.timeout.as_secs()
                ));
            }
            Event::WaitFinished { stage, elapsed } => {
                self.finish(&format!("{stage} ready after {}s", elapsed.as_secs()));
            }
            Event::StageCompleted { .. } => {}
            Event::StageFailed { stage, .. } => self.halt(stage),
            Event::Settling { delay } => {
                self.start(&format!("Letting the ingress settle for {}s", delay.as_secs()));
            }
        }
    }
}

impl Drop for CliNotifier {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(stage: StageKind) -> Event {
        Event::StageFailed {
            stage,
            reason: "timed out waiting for the condition".into(),
        }
    }

    #[test]
    fn halt_line_leaves_reason_to_the_error_report() {
        let line = halted(StageKind::Backend);
        assert!(line.contains("backend"));
        assert!(!line.contains("timed out"));
    }

    #[test]
    fn stage_failure_stops_running_spinner() {
        let notifier = CliNotifier::new();
        notifier.start("Waiting for pods app=backend");
        notifier.notify(failure(StageKind::Backend));
        assert!(notifier.active.lock().is_none());
    }

    #[test]
    fn stage_failure_without_spinner_leaves_nothing_running() {
        let notifier = CliNotifier::new();
        notifier.notify(failure(StageKind::Database));
        assert!(notifier.active.lock().is_none());
    }
}
