//! Time-of-day arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::time::TimeOfDay;

/// Shown when neither a target time nor an hour count is filled in.
pub const PROMPT: &str = "Fill target time OR hours to add";

/// Shown in place of a result while the input is in conflict.
pub const NO_RESULT: &str = "--";

/// A forward distance between two clock readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub hours: u32,
    pub minutes: u32,
}

impl Offset {
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Time remaining until the target.
    Until { offset: Offset },
    /// Clock reading after adding hours.
    At { time: TimeOfDay },
    /// Nothing to compute yet.
    Prompt,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Until { offset } => fmt::Display::fmt(offset, f),
            Outcome::At { time } => fmt::Display::fmt(time, f),
            Outcome::Prompt => f.write_str(PROMPT),
        }
    }
}

/// Offset to `target`, or the reading `add_hours` after `base`.
///
/// A target earlier than `base` is taken to be on the next day.
pub fn compute(
    base: TimeOfDay,
    target: Option<TimeOfDay>,
    add_hours: Option<u32>,
) -> Result<Outcome, CalcError> {
    match (target, add_hours) {
        (Some(_), Some(_)) => Err(CalcError::ConflictingInput),
        (Some(target), None) => Ok(Outcome::Until {
            offset: Offset::from_minutes(base.minutes_until(&target)),
        }),
        (None, Some(hours)) => Ok(Outcome::At {
            time: base.plus_hours(hours),
        }),
        (None, None) => Ok(Outcome::Prompt),
    }
}

/// What the result card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readout {
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Readout {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<Result<Outcome, CalcError>> for Readout {
    fn from(result: Result<Outcome, CalcError>) -> Self {
        match result {
            Ok(outcome) => Self {
                output: outcome.to_string(),
                error: None,
            },
            Err(e) => Self {
                output: NO_RESULT.to_string(),
                error: Some(e.to_string()),
            },
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => f.write_str(error),
            None => f.write_str(&self.output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Meridiem;

    fn t(hour: u32, minute: u32, meridiem: Meridiem) -> TimeOfDay {
        TimeOfDay::new(hour, minute, meridiem).unwrap()
    }

    #[test]
    fn nine_to_five_is_eight_hours() {
        let out = compute(t(9, 0, Meridiem::Am), Some(t(5, 0, Meridiem::Pm)), None).unwrap();
        assert_eq!(out.to_string(), "8h 0m");
    }

    #[test]
    fn eleven_pm_plus_three_is_two_am() {
        let out = compute(t(11, 0, Meridiem::Pm), None, Some(3)).unwrap();
        assert_eq!(out.to_string(), "2:00 AM");
    }

    #[test]
    fn earlier_target_wraps_to_tomorrow() {
        let out = compute(t(5, 0, Meridiem::Pm), Some(t(9, 15, Meridiem::Am)), None).unwrap();
        assert_eq!(out.to_string(), "16h 15m");
    }

    #[test]
    fn same_time_is_zero() {
        let base = t(3, 45, Meridiem::Pm);
        assert_eq!(compute(base, Some(base), None).unwrap().to_string(), "0h 0m");
    }

    #[test]
    fn both_inputs_conflict() {
        let base = t(9, 0, Meridiem::Am);
        let result = compute(base, Some(base), Some(2));
        assert_eq!(result, Err(CalcError::ConflictingInput));
        let readout = Readout::from(result);
        assert_eq!(readout.output, "--");
        assert!(readout.is_error());
        assert_eq!(readout.to_string(), "Please fill only target time OR hours to add");
    }

    #[test]
    fn neither_input_prompts() {
        let readout = Readout::from(compute(t(9, 0, Meridiem::Am), None, None));
        assert_eq!(readout.output, PROMPT);
        assert!(!readout.is_error());
    }

    #[test]
    fn zero_hours_is_same_reading() {
        let base = t(7, 30, Meridiem::Am);
        assert_eq!(
            compute(base, None, Some(0)).unwrap(),
            Outcome::At { time: base }
        );
    }
}
