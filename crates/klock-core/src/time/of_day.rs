//! Twelve-hour time of day.
//!
//! A [`TimeOfDay`] is always a valid 12-hour reading (hour 1-12, minute
//! 0-59) and converts losslessly to minutes since midnight in `[0, 1440)`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    fn offset_hours(&self) -> u32 {
        match self {
            Meridiem::Am => 0,
            Meridiem::Pm => 12,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            other => Err(ValidationError::InvalidValue {
                field: "meridiem",
                message: format!("expected AM or PM, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

/// Unchecked wire form; deserialized readings go through [`TimeOfDay::new`].
#[derive(Deserialize)]
struct RawTimeOfDay {
    hour: u32,
    minute: u32,
    meridiem: Meridiem,
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute, raw.meridiem)
    }
}

impl TimeOfDay {
    /// Build from a 12-hour reading.
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Result<Self, ValidationError> {
        check_range("hour", hour, 1, 12)?;
        check_range("minute", minute, 0, 59)?;
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
            meridiem,
        })
    }

    /// Build from a 24-hour reading.
    pub fn from_24h(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        check_range("hour", hour, 0, 23)?;
        check_range("minute", minute, 0, 59)?;
        Ok(Self::from_minutes(hour * 60 + minute))
    }

    /// Build from minutes since midnight; values past one day wrap.
    pub fn from_minutes(total: u32) -> Self {
        let total = total % MINUTES_PER_DAY;
        let hour24 = total / 60;
        let minute = total % 60;
        let meridiem = if hour24 >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let hour = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        Self {
            hour: hour as u8,
            minute: minute as u8,
            meridiem,
        }
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self::from_minutes(time.hour() * 60 + time.minute())
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Minutes since midnight, in `[0, 1440)`.
    pub fn to_minutes(&self) -> u32 {
        ((self.hour as u32 % 12) + self.meridiem.offset_hours()) * 60 + self.minute as u32
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    pub fn minutes_until(&self, later: &TimeOfDay) -> u32 {
        let diff = later.to_minutes() as i64 - self.to_minutes() as i64;
        diff.rem_euclid(MINUTES_PER_DAY as i64) as u32
    }

    /// The clock reading `hours` from now.
    pub fn plus_hours(&self, hours: u32) -> Self {
        let future = (self.to_minutes() as u64 + hours as u64 * 60) % MINUTES_PER_DAY as u64;
        Self::from_minutes(future as u32)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}
