//! The hours calculator as a stateful component.
//!
//! Each accepted edit recomputes the readout and writes the full field set
//! back to the store before returning. Refused edits change nothing.

use super::compute::Readout;
use super::input::{ADD_HOURS, HOUR, MINUTE};
use super::state::CalculatorState;
use crate::error::Result;
use crate::storage::KvStore;
use crate::time::{Meridiem, SystemClock, TimeOfDay, WallClock};

pub struct HoursCalculator<S, C = SystemClock> {
    store: S,
    clock: C,
    state: CalculatorState,
    readout: Readout,
}

impl<S: KvStore, C: WallClock> HoursCalculator<S, C> {
    /// Hydrate from `store` and compute the initial readout.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(store: S, clock: C) -> Result<Self> {
        let state = CalculatorState::load(&store)?;
        let readout = state.evaluate(&clock).into();
        Ok(Self {
            store,
            clock,
            state,
            readout,
        })
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    /// The live clock line, in 12-hour notation.
    pub fn current_time_display(&self) -> String {
        TimeOfDay::from_naive_time(self.clock.now()).to_string()
    }

    /// Re-sample the clock and recompute without touching the store.
    pub fn refresh(&mut self) -> &Readout {
        self.readout = self.state.evaluate(&self.clock).into();
        &self.readout
    }

    pub fn set_use_custom_start(&mut self, enabled: bool) -> Result<()> {
        self.state.use_custom_start = enabled;
        self.commit()
    }

    /// Returns `false` (and changes nothing) if the hour is refused.
    pub fn set_start_hour(&mut self, hour: Option<u32>) -> Result<bool> {
        if !hour.map_or(true, |h| HOUR.accepts(h)) {
            return Ok(false);
        }
        self.state.start_hour = hour;
        self.commit()?;
        Ok(true)
    }

    /// Returns `false` (and changes nothing) if the minute is refused.
    pub fn set_start_minute(&mut self, minute: Option<u32>) -> Result<bool> {
        if !minute.map_or(true, |m| MINUTE.accepts(m)) {
            return Ok(false);
        }
        self.state.start_minute = minute;
        self.commit()?;
        Ok(true)
    }

    pub fn set_start_meridiem(&mut self, meridiem: Meridiem) -> Result<()> {
        self.state.start_meridiem = meridiem;
        self.commit()
    }

    /// Filling the target hour empties the hours-to-add field.
    pub fn set_target_hour(&mut self, hour: Option<u32>) -> Result<bool> {
        if !hour.map_or(true, |h| HOUR.accepts(h)) {
            return Ok(false);
        }
        self.state.target_hour = hour;
        if hour.is_some() {
            self.state.add_hours = None;
        }
        self.commit()?;
        Ok(true)
    }

    pub fn set_target_minute(&mut self, minute: Option<u32>) -> Result<bool> {
        if !minute.map_or(true, |m| MINUTE.accepts(m)) {
            return Ok(false);
        }
        self.state.target_minute = minute;
        self.commit()?;
        Ok(true)
    }

    pub fn set_target_meridiem(&mut self, meridiem: Meridiem) -> Result<()> {
        self.state.target_meridiem = meridiem;
        self.commit()
    }

    /// Filling hours-to-add empties the target hour and minute.
    pub fn set_add_hours(&mut self, hours: Option<u32>) -> Result<bool> {
        if !hours.map_or(true, |h| ADD_HOURS.accepts(h)) {
            return Ok(false);
        }
        self.state.add_hours = hours;
        if hours.is_some() {
            self.state.target_hour = None;
            self.state.target_minute = None;
        }
        self.commit()?;
        Ok(true)
    }

    /// Clear every field back to its default.
    pub fn reset(&mut self) -> Result<()> {
        self.state = CalculatorState::default();
        self.commit()
    }

    fn commit(&mut self) -> Result<()> {
        self.refresh();
        self.state.save(&self.store)?;
        tracing::debug!(output = %self.readout, "calculator updated");
        Ok(())
    }
}
