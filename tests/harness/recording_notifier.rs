//! Event capture for rollout assertions.

use std::sync::Arc;

use deployctl::domain::StageKind;
use deployctl::port::{Event, Notifier};
use parking_lot::Mutex;

/// Keeps every event a run emitted; clones share one log.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to hand to the pipeline.
    pub fn shared(&self) -> Arc<dyn Notifier> {
        Arc::new(self.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.seen.lock().clone()
    }

    /// `(stage, reason)` for every `StageFailed`, in order.
    pub fn stage_failures(&self) -> Vec<(StageKind, String)> {
        self.seen
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::StageFailed { stage, reason } => Some((*stage, reason.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn started(&self, kind: StageKind) -> bool {
        self.seen
            .lock()
            .iter()
            .any(|event| matches!(event, Event::StageStarted { stage } if *stage == kind))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.seen.lock().push(event);
    }
}
