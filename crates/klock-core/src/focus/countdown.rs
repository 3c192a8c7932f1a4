//! Foreground countdown loop.

use chrono::{DateTime, Utc};

use super::FocusSession;
use crate::events::Event;
use crate::ticker::Ticker;

/// Advance a running session on every tick until it completes.
///
/// Ticks only wake the loop; the seconds applied come from `now`, the same
/// wall clock a persisted session catches up with. A stall (suspend, sleep)
/// is absorbed on the next wake-up. `on_tick` sees the session after every
/// wake-up.
///
/// Returns the completion event, or `None` if the session was not running
/// or the ticker stopped first.
pub async fn run_countdown<N, R>(
    session: &mut FocusSession,
    ticker: &mut Ticker,
    mut now: N,
    mut on_tick: R,
) -> Option<Event>
where
    N: FnMut() -> DateTime<Utc>,
    R: FnMut(&FocusSession),
{
    while session.is_running() {
        ticker.next().await?;
        let completed = session.catch_up(now());
        on_tick(session);
        if completed.is_some() {
            return completed;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use tokio::time::Instant;

    use super::*;
    use crate::focus::SessionState;
    use crate::ticker::TICK_PERIOD;

    /// Wall clock that follows tokio's paused clock, plus an optional jump.
    fn paused_wall_clock(
        base: DateTime<Utc>,
        origin: Instant,
        jump: &Cell<i64>,
    ) -> impl FnMut() -> DateTime<Utc> + '_ {
        move || {
            base + chrono::Duration::from_std(origin.elapsed()).unwrap()
                + chrono::Duration::seconds(jump.get())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn completes_exactly_once() {
        let base = Utc::now();
        let origin = Instant::now();
        let jump = Cell::new(0);
        let mut session = FocusSession::new(5, false);
        session.start_at(base);

        let mut ticker = Ticker::start(TICK_PERIOD);
        let mut wakeups = 0;
        let event = run_countdown(
            &mut session,
            &mut ticker,
            paused_wall_clock(base, origin, &jump),
            |_| wakeups += 1,
        )
        .await;

        assert!(matches!(event, Some(Event::SessionCompleted { .. })));
        assert_eq!(wakeups, 300);
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.remaining_secs(), 0);

        let again = run_countdown(
            &mut session,
            &mut ticker,
            paused_wall_clock(base, origin, &jump),
            |_| panic!("no tick expected once completed"),
        )
        .await;
        assert!(again.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn absorbs_a_stalled_process() {
        let base = Utc::now();
        let origin = Instant::now();
        let jump = Cell::new(0);
        let mut session = FocusSession::new(5, false);
        session.start_at(base);

        let mut ticker = Ticker::start(TICK_PERIOD);
        let wakeups = Cell::new(0);
        let event = run_countdown(
            &mut session,
            &mut ticker,
            paused_wall_clock(base, origin, &jump),
            |_| {
                wakeups.set(wakeups.get() + 1);
                if wakeups.get() == 10 {
                    jump.set(100);
                }
            },
        )
        .await;

        assert!(event.is_some());
        assert_eq!(wakeups.get(), 200);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_session_returns_at_once() {
        let mut session = FocusSession::new(5, false);
        let mut ticker = Ticker::start(TICK_PERIOD);
        let event = run_countdown(&mut session, &mut ticker, Utc::now, |_| {}).await;
        assert!(event.is_none());
        assert_eq!(session.state(), SessionState::Setup);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_the_ticker_is_cancelled() {
        let mut session = FocusSession::new(5, false);
        session.start();
        let mut ticker = Ticker::start(TICK_PERIOD);
        ticker.cancel();
        let event = run_countdown(&mut session, &mut ticker, Utc::now, |_| {}).await;
        assert!(event.is_none());
        assert!(session.is_running());
    }
}
