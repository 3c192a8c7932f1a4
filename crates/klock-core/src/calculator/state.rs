use serde::{Deserialize, Serialize};

use super::compute::{compute, Outcome};
use super::input::{FieldRule, ADD_HOURS, HOUR, MINUTE};
use crate::error::{CalcError, Result};
use crate::storage::{keys, KvStore};
use crate::time::{Meridiem, TimeOfDay, WallClock};

/// Every input of the hours calculator.
///
/// Empty fields are `None`. A target counts as filled once its hour is;
/// an empty target minute then reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub use_custom_start: bool,
    pub start_hour: Option<u32>,
    pub start_minute: Option<u32>,
    pub start_meridiem: Meridiem,
    pub target_hour: Option<u32>,
    pub target_minute: Option<u32>,
    pub target_meridiem: Meridiem,
    pub add_hours: Option<u32>,
}

impl CalculatorState {
    /// The custom start reading. Empty fields count as zero, so a blank hour
    /// with PM is noon.
    pub fn custom_start(&self) -> TimeOfDay {
        fields_to_time(self.start_hour, self.start_minute, self.start_meridiem)
    }

    pub fn target(&self) -> Option<TimeOfDay> {
        self.target_hour
            .map(|hour| fields_to_time(Some(hour), self.target_minute, self.target_meridiem))
    }

    /// The reading arithmetic starts from: the custom start if enabled,
    /// otherwise whatever `clock` says right now.
    pub fn base<C: WallClock + ?Sized>(&self, clock: &C) -> TimeOfDay {
        if self.use_custom_start {
            self.custom_start()
        } else {
            TimeOfDay::from_naive_time(clock.now())
        }
    }

    pub fn evaluate<C: WallClock + ?Sized>(&self, clock: &C) -> Result<Outcome, CalcError> {
        compute(self.base(clock), self.target(), self.add_hours)
    }

    /// Read every field from `store`. Missing keys take their defaults and
    /// unreadable values are treated as empty.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self {
            use_custom_start: store.get(keys::USE_CUSTOM_START)?.as_deref() == Some("true"),
            start_hour: load_field(store, keys::START_HOUR, HOUR)?,
            start_minute: load_field(store, keys::START_MINUTE, MINUTE)?,
            start_meridiem: load_meridiem(store, keys::START_MERIDIEM)?,
            target_hour: load_field(store, keys::TARGET_HOUR, HOUR)?,
            target_minute: load_field(store, keys::TARGET_MINUTE, MINUTE)?,
            target_meridiem: load_meridiem(store, keys::TARGET_MERIDIEM)?,
            add_hours: load_field(store, keys::ADD_HOURS, ADD_HOURS)?,
        })
    }

    /// Write the full field set.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save<S: KvStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set(keys::USE_CUSTOM_START, &self.use_custom_start.to_string())?;
        store.set(keys::START_HOUR, &field_text(self.start_hour))?;
        store.set(keys::START_MINUTE, &field_text(self.start_minute))?;
        store.set(keys::START_MERIDIEM, self.start_meridiem.as_str())?;
        store.set(keys::TARGET_HOUR, &field_text(self.target_hour))?;
        store.set(keys::TARGET_MINUTE, &field_text(self.target_minute))?;
        store.set(keys::TARGET_MERIDIEM, self.target_meridiem.as_str())?;
        store.set(keys::ADD_HOURS, &field_text(self.add_hours))?;
        Ok(())
    }
}

fn fields_to_time(hour: Option<u32>, minute: Option<u32>, meridiem: Meridiem) -> TimeOfDay {
    let hour = hour.unwrap_or(0) % 12;
    let minute = minute.unwrap_or(0) % 60;
    let pm = if meridiem == Meridiem::Pm { 12 } else { 0 };
    TimeOfDay::from_minutes((hour + pm) * 60 + minute)
}

fn field_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn load_field<S: KvStore + ?Sized>(store: &S, key: &str, rule: FieldRule) -> Result<Option<u32>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match rule.parse(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring stored calculator field");
            Ok(None)
        }
    }
}

fn load_meridiem<S: KvStore + ?Sized>(store: &S, key: &str) -> Result<Meridiem> {
    Ok(store
        .get(key)?
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::time::FixedClock;
    use chrono::NaiveTime;

    fn clock(h: u32, m: u32) -> FixedClock {
        FixedClock(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn blank_custom_start_with_pm_is_noon() {
        let state = CalculatorState {
            use_custom_start: true,
            start_meridiem: Meridiem::Pm,
            ..Default::default()
        };
        assert_eq!(state.custom_start().to_minutes(), 720);
    }

    #[test]
    fn target_minute_defaults_to_zero() {
        let state = CalculatorState {
            target_hour: Some(4),
            target_meridiem: Meridiem::Pm,
            ..Default::default()
        };
        assert_eq!(state.target().unwrap().to_string(), "4:00 PM");
    }

    #[test]
    fn minute_alone_does_not_make_a_target() {
        let state = CalculatorState {
            target_minute: Some(30),
            ..Default::default()
        };
        assert!(state.target().is_none());
        assert_eq!(
            state.evaluate(&clock(10, 0)).unwrap(),
            Outcome::Prompt
        );
    }

    #[test]
    fn base_follows_custom_toggle() {
        let mut state = CalculatorState {
            start_hour: Some(9),
            start_minute: Some(0),
            ..Default::default()
        };
        assert_eq!(state.base(&clock(14, 20)).to_string(), "2:20 PM");
        state.use_custom_start = true;
        assert_eq!(state.base(&clock(14, 20)).to_string(), "9:00 AM");
    }

    #[test]
    fn empty_store_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(CalculatorState::load(&store).unwrap(), CalculatorState::default());
    }

    #[test]
    fn save_load_round_trip() {
        let store = MemoryStore::new();
        let state = CalculatorState {
            use_custom_start: true,
            start_hour: Some(11),
            start_minute: Some(5),
            start_meridiem: Meridiem::Pm,
            target_hour: None,
            target_minute: None,
            target_meridiem: Meridiem::Am,
            add_hours: Some(3),
        };
        state.save(&store).unwrap();
        assert_eq!(store.get(keys::TARGET_HOUR).unwrap().as_deref(), Some(""));
        assert_eq!(store.get(keys::START_MERIDIEM).unwrap().as_deref(), Some("PM"));
        assert_eq!(CalculatorState::load(&store).unwrap(), state);
    }

    #[test]
    fn load_drops_out_of_range_values() {
        let store = MemoryStore::new();
        store.set(keys::START_HOUR, "40").unwrap();
        store.set(keys::TARGET_MINUTE, "x").unwrap();
        store.set(keys::TARGET_MERIDIEM, "noon").unwrap();
        store.set(keys::USE_CUSTOM_START, "yes").unwrap();
        let state = CalculatorState::load(&store).unwrap();
        assert_eq!(state.start_hour, None);
        assert_eq!(state.target_minute, None);
        assert_eq!(state.target_meridiem, Meridiem::Am);
        assert!(!state.use_custom_start);
    }
}
