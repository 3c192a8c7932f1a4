mod countdown;
mod session;

pub use countdown::run_countdown;
pub use session::{
    clamp_duration, FocusSession, SessionState, DEFAULT_DURATION_MIN, DURATION_STEP_MIN,
    MAX_DURATION_MIN, MIN_DURATION_MIN,
};
