//! Fire-and-forget notifications for focus-session lifecycle events.

use std::sync::Mutex;

use crate::events::Event;

/// Receives session events. Return values are never consumed, so
/// implementations must swallow their own failures.
pub trait Notifier {
    fn notify(&self, event: &Event);
}

/// Logs lifecycle notices through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &Event) {
        if let Some(notice) = event.notice() {
            tracing::info!(event = ?event, "{notice}");
        }
    }
}

/// Keeps every event it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Event>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, event: &Event) {
        (**self).notify(event)
    }
}

/// Forward an optional event, the shape every session command returns.
pub fn dispatch(notifier: &dyn Notifier, event: Option<&Event>) {
    if let Some(event) = event {
        notifier.notify(event);
    }
}
