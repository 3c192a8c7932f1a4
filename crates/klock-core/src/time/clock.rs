use chrono::{Local, NaiveTime};

/// Source of the current local time of day.
///
/// The calculator re-samples this on every evaluation when no custom start
/// is in use.
pub trait WallClock {
    fn now(&self) -> NaiveTime;
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock frozen at one instant. Handy for tests and previews.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl WallClock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now(&self) -> NaiveTime {
        (**self).now()
    }
}
