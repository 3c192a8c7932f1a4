//! Cancellable once-per-period tick source.
//!
//! A [`Ticker`] owns a tokio task driving an interval and hands ticks out
//! through a channel. Dropping the ticker aborts the task, so leaving a
//! loop through any path releases the interval.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Period of the display and countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct Ticker {
    rx: mpsc::Receiver<Instant>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking. The first tick arrives one `period` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let at = interval.tick().await;
                if tx.send(at).await.is_err() {
                    break;
                }
            }
        });
        Self {
            rx,
            task: Some(task),
        }
    }

    /// Wait for the next tick. Returns `None` once cancelled.
    pub async fn next(&mut self) -> Option<Instant> {
        if self.task.is_none() {
            return None;
        }
        self.rx.recv().await
    }

    /// Stop ticking. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.rx.close();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::start(TICK_PERIOD);
        let first = ticker.next().await.unwrap();
        let second = ticker.next().await.unwrap();
        assert_eq!(first - start, TICK_PERIOD);
        assert_eq!(second - first, TICK_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let mut ticker = Ticker::start(TICK_PERIOD);
        ticker.next().await.unwrap();
        ticker.cancel();
        ticker.cancel();
        assert!(!ticker.is_active());
        assert!(ticker.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn drives_a_countdown_to_completion() {
        use crate::events::Event;
        use crate::focus::FocusSession;

        let mut session = FocusSession::new(5, false);
        session.start();
        let mut ticker = Ticker::start(TICK_PERIOD);
        let mut ticks = 0;
        while ticker.next().await.is_some() {
            ticks += 1;
            if let Some(Event::SessionCompleted { .. }) = session.tick() {
                ticker.cancel();
            }
        }
        assert_eq!(ticks, 300);
        assert_eq!(session.remaining_secs(), 0);
    }
}
