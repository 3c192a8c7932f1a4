//! Focus session countdown.
//!
//! The session is a one-second-tick state machine. It does not use internal
//! threads - the caller drives it with `tick()`, or with `catch_up()` against
//! the wall clock. Persisted sessions only ever use the wall clock.
//!
//! ## State Transitions
//!
//! ```text
//! Setup -> Running <-> Paused
//!            |
//!            v
//!        Completed -> Running (start again)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = FocusSession::new(25, false);
//! session.start();
//! // Once a second:
//! session.tick(); // Returns Some(Event::SessionCompleted) at zero
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::Event;
use crate::storage::{keys, KvStore};

pub const MIN_DURATION_MIN: u32 = 5;
pub const MAX_DURATION_MIN: u32 = 90;
pub const DURATION_STEP_MIN: u32 = 5;
pub const DEFAULT_DURATION_MIN: u32 = 20;

/// Force a duration into `[MIN_DURATION_MIN, MAX_DURATION_MIN]`.
pub fn clamp_duration(minutes: u32) -> u32 {
    minutes.clamp(MIN_DURATION_MIN, MAX_DURATION_MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Setup,
    Running,
    Paused,
    Completed,
}

/// Countdown derived from a duration in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    duration_min: u32,
    skip_breaks: bool,
    state: SessionState,
    /// Always within `[0, duration_min * 60]`.
    remaining_secs: u32,
    /// Instant up to which elapsed time has been applied.
    /// Only set while Running.
    #[serde(default)]
    synced_at: Option<DateTime<Utc>>,
}

impl FocusSession {
    /// Create a session in Setup with a full countdown.
    pub fn new(duration_min: u32, skip_breaks: bool) -> Self {
        let duration_min = clamp_duration(duration_min);
        Self {
            duration_min,
            skip_breaks,
            state: SessionState::Setup,
            remaining_secs: duration_min * 60,
            synced_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    pub fn skip_breaks(&self) -> bool {
        self.skip_breaks
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.duration_min * 60
    }

    /// 0.0 .. 100.0 elapsed share of the countdown.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs() as f64;
        if total == 0.0 {
            return 0.0;
        }
        (total - self.remaining_secs as f64) / total * 100.0
    }

    /// Remaining time split as (minutes, seconds).
    pub fn remaining_parts(&self) -> (u32, u32) {
        (self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Hint shown next to the skip-breaks flag. The flag has no effect on
    /// timing.
    pub fn breaks_hint(&self) -> &'static str {
        if self.skip_breaks {
            "You'll have no breaks"
        } else {
            "Short breaks will be added automatically"
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            duration_min: self.duration_min,
            remaining_secs: self.remaining_secs,
            progress_pct: self.progress_pct(),
            skip_breaks: self.skip_breaks,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh countdown from the full duration.
    pub fn start(&mut self) -> Option<Event> {
        self.start_at(Utc::now())
    }

    /// [`start`](Self::start) with the wall clock anchored at `now`.
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state == SessionState::Running {
            return None;
        }
        self.remaining_secs = self.total_secs();
        self.state = SessionState::Running;
        self.synced_at = Some(now);
        Some(Event::SessionStarted {
            duration_min: self.duration_min,
            at: now,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.state = SessionState::Paused;
        self.synced_at = None;
        Some(Event::SessionPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(Utc::now())
    }

    pub fn resume_at(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        self.state = SessionState::Running;
        self.synced_at = Some(now);
        Some(Event::SessionResumed {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    /// Back to Setup with a full countdown.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = SessionState::Setup;
        self.synced_at = None;
        self.remaining_secs = self.total_secs();
        Some(Event::SessionReset { at: Utc::now() })
    }

    /// One second elapsed. Returns `Some(Event::SessionCompleted)` exactly
    /// once, on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        self.elapse(1)
    }

    /// Apply `secs` seconds of running time at once.
    pub fn elapse(&mut self, secs: u64) -> Option<Event> {
        if self.state != SessionState::Running || secs == 0 {
            return None;
        }
        if secs >= self.remaining_secs as u64 {
            self.remaining_secs = 0;
            self.state = SessionState::Completed;
            self.synced_at = None;
            tracing::info!(duration_min = self.duration_min, "focus session completed");
            return Some(Event::SessionCompleted {
                duration_min: self.duration_min,
                at: Utc::now(),
            });
        }
        self.remaining_secs -= secs as u32;
        None
    }

    /// Apply the whole seconds that passed between the last sync and `now`.
    ///
    /// The sync point only moves by the seconds applied, so the fraction
    /// left over counts toward the next call however often it is made.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let since = self.synced_at?;
        if self.state != SessionState::Running {
            return None;
        }
        let elapsed = (now - since).num_seconds();
        if elapsed <= 0 {
            return None;
        }
        self.synced_at = Some(since + Duration::seconds(elapsed));
        self.elapse(elapsed as u64)
    }

    /// Add one step to the duration. No-op while running or at the maximum.
    pub fn increment_duration(&mut self) -> Option<Event> {
        if self.duration_min >= MAX_DURATION_MIN {
            return None;
        }
        self.set_duration(self.duration_min + DURATION_STEP_MIN)
    }

    /// Remove one step from the duration. No-op while running or at the
    /// minimum.
    pub fn decrement_duration(&mut self) -> Option<Event> {
        if self.duration_min <= MIN_DURATION_MIN {
            return None;
        }
        self.set_duration(self.duration_min - DURATION_STEP_MIN)
    }

    pub fn set_skip_breaks(&mut self, skip: bool) {
        self.skip_breaks = skip;
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Hydrate from a store, falling back to `default_duration` when no
    /// duration has been stored.
    ///
    /// A running countdown is caught up to the current time, so this may
    /// return the completion event.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load<S: KvStore + ?Sized>(
        store: &S,
        default_duration: u32,
    ) -> Result<(Self, Option<Event>)> {
        Self::load_at(store, default_duration, Utc::now())
    }

    /// [`load`](Self::load), catching up to `now` instead of the wall clock.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load_at<S: KvStore + ?Sized>(
        store: &S,
        default_duration: u32,
        now: DateTime<Utc>,
    ) -> Result<(Self, Option<Event>)> {
        let duration = match store.get(keys::FOCUS_DURATION)? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(minutes) => clamp_duration(minutes),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring malformed stored focus duration");
                    clamp_duration(default_duration)
                }
            },
            None => clamp_duration(default_duration),
        };
        let skip_breaks = store.get(keys::SKIP_BREAKS)?.as_deref() == Some("true");

        let mut session = store
            .get(keys::FOCUS_SESSION)?
            .and_then(|json| match serde_json::from_str::<FocusSession>(&json) {
                Ok(runtime) => Some(runtime),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable focus session snapshot");
                    None
                }
            })
            .filter(|runtime| runtime.duration_min == duration && runtime.is_consistent())
            .unwrap_or_else(|| Self::new(duration, skip_breaks));
        session.skip_breaks = skip_breaks;

        let completed = session.catch_up(now);
        Ok((session, completed))
    }

    /// Persist settings and the runtime snapshot.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save<S: KvStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set(keys::FOCUS_DURATION, &self.duration_min.to_string())?;
        store.set(keys::SKIP_BREAKS, &self.skip_breaks.to_string())?;
        store.set(keys::FOCUS_SESSION, &serde_json::to_string(self)?)?;
        tracing::debug!(
            state = ?self.state,
            remaining_secs = self.remaining_secs,
            "saved focus session"
        );
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn set_duration(&mut self, minutes: u32) -> Option<Event> {
        if self.state == SessionState::Running {
            return None;
        }
        self.duration_min = clamp_duration(minutes);
        self.remaining_secs = self.total_secs();
        if self.state == SessionState::Completed {
            self.state = SessionState::Setup;
        }
        Some(Event::DurationChanged {
            duration_min: self.duration_min,
            at: Utc::now(),
        })
    }

    fn is_consistent(&self) -> bool {
        (MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&self.duration_min)
            && self.remaining_secs <= self.total_secs()
            && (self.state != SessionState::Completed || self.remaining_secs == 0)
            && (self.state != SessionState::Running || self.synced_at.is_some())
    }
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MIN, false)
    }
}
