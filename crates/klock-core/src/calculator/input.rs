//! Field acceptance rules.
//!
//! A field either holds an in-range value or is empty; anything else is
//! refused before it can reach the arithmetic.

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
}

pub const HOUR: FieldRule = FieldRule {
    name: "hour",
    min: 1,
    max: 12,
};

pub const MINUTE: FieldRule = FieldRule {
    name: "minute",
    min: 0,
    max: 59,
};

pub const ADD_HOURS: FieldRule = FieldRule {
    name: "hours to add",
    min: 0,
    max: 999,
};

impl FieldRule {
    pub fn accepts(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check an already-numeric value.
    pub fn check(&self, value: u32) -> Result<u32, ValidationError> {
        if self.accepts(value) {
            Ok(value)
        } else {
            Err(ValidationError::OutOfRange {
                field: self.name,
                min: self.min,
                max: self.max,
                value,
            })
        }
    }

    /// Parse raw field text. Blank text clears the field.
    pub fn parse(&self, raw: &str) -> Result<Option<u32>, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let value = raw
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidValue {
                field: self.name,
                message: format!("'{raw}' is not a whole number"),
            })?;
        self.check(value).map(Some)
    }
}
