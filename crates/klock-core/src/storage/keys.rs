//! Names of the persisted fields.
//!
//! Keys use the camelCase names of the browser widget's local storage, so
//! an exported dump can be loaded as-is.

pub const USE_CUSTOM_START: &str = "useCustomStart";
pub const START_HOUR: &str = "startHour";
pub const START_MINUTE: &str = "startMinute";
pub const START_MERIDIEM: &str = "startAmPm";
pub const TARGET_HOUR: &str = "targetHour";
pub const TARGET_MINUTE: &str = "targetMinute";
pub const TARGET_MERIDIEM: &str = "targetAmPm";
pub const ADD_HOURS: &str = "addHours";

pub const FOCUS_DURATION: &str = "focusDuration";
pub const SKIP_BREAKS: &str = "skipBreaks";

/// JSON snapshot of the countdown's runtime state.
pub const FOCUS_SESSION: &str = "focusSession";

/// Every calculator field, in the order they are written.
pub const CALCULATOR_FIELDS: [&str; 8] = [
    USE_CUSTOM_START,
    START_HOUR,
    START_MINUTE,
    START_MERIDIEM,
    TARGET_HOUR,
    TARGET_MINUTE,
    TARGET_MERIDIEM,
    ADD_HOURS,
];
