mod clock;
mod of_day;

pub use clock::{FixedClock, SystemClock, WallClock};
pub use of_day::{Meridiem, TimeOfDay, MINUTES_PER_DAY};
