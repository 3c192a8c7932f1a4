use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::focus::SessionState;

/// Every focus-session state change produces an Event.
/// Front ends print them; notifiers react to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    DurationChanged {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    /// Full state snapshot, sent on request.
    StateSnapshot {
        state: SessionState,
        duration_min: u32,
        remaining_secs: u32,
        progress_pct: f64,
        skip_breaks: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short user-facing notice for lifecycle events, if this is one.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Event::SessionStarted { .. } => Some("Focus session started"),
            Event::SessionPaused { .. } => Some("Focus session paused"),
            Event::SessionResumed { .. } => Some("Focus session resumed"),
            Event::SessionCompleted { .. } => Some("Focus session completed!"),
            _ => None,
        }
    }

    /// Whether the notice reports success rather than plain information.
    pub fn is_success(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_tag() {
        let event = Event::SessionPaused {
            remaining_secs: 42,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "session_paused");
        assert_eq!(json["remaining_secs"], 42);
    }

    #[test]
    fn only_lifecycle_events_carry_notices() {
        let now = Utc::now();
        assert_eq!(
            Event::SessionCompleted { duration_min: 20, at: now }.notice(),
            Some("Focus session completed!")
        );
        assert!(Event::SessionReset { at: now }.notice().is_none());
        assert!(Event::DurationChanged { duration_min: 25, at: now }.notice().is_none());
    }
}
