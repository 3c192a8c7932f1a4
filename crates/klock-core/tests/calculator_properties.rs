//! Arithmetic laws of the hours calculator.

use klock_core::{compute, Meridiem, Offset, Outcome, TimeOfDay};
use proptest::prelude::*;

fn time_of_day() -> impl Strategy<Value = TimeOfDay> {
    (0u32..1440).prop_map(TimeOfDay::from_minutes)
}

proptest! {
    #[test]
    fn same_reading_is_zero_offset(base in time_of_day()) {
        let out = compute(base, Some(base), None).unwrap();
        prop_assert_eq!(out.to_string(), "0h 0m");
    }

    #[test]
    fn adding_then_measuring_recovers_hours(base in time_of_day(), hours in 0u32..=999) {
        let Outcome::At { time } = compute(base, None, Some(hours)).unwrap() else {
            panic!("expected a clock reading");
        };
        let Outcome::Until { offset } = compute(time, Some(base), None).unwrap() else {
            panic!("expected an offset");
        };
        // Going forward from `time` back to `base` covers the rest of the day.
        let back = offset.total_minutes();
        prop_assert_eq!((hours * 60 + back) % 1440, 0);
    }

    #[test]
    fn measuring_from_base_to_result_is_hours_mod_day(base in time_of_day(), hours in 0u32..=999) {
        let Outcome::At { time } = compute(base, None, Some(hours)).unwrap() else {
            panic!("expected a clock reading");
        };
        let Outcome::Until { offset } = compute(base, Some(time), None).unwrap() else {
            panic!("expected an offset");
        };
        prop_assert_eq!(offset, Offset::from_minutes((hours % 24) * 60));
    }

    #[test]
    fn offsets_stay_within_a_day(base in time_of_day(), target in time_of_day()) {
        let Outcome::Until { offset } = compute(base, Some(target), None).unwrap() else {
            panic!("expected an offset");
        };
        prop_assert!(offset.total_minutes() < 1440);
        prop_assert!(offset.minutes < 60);
    }

    #[test]
    fn twelve_hour_readings_round_trip(hour in 1u32..=12, minute in 0u32..60, pm in any::<bool>()) {
        let meridiem = if pm { Meridiem::Pm } else { Meridiem::Am };
        let t = TimeOfDay::new(hour, minute, meridiem).unwrap();
        prop_assert!(t.to_minutes() < 1440);
        prop_assert_eq!(TimeOfDay::from_minutes(t.to_minutes()), t);
    }
}

#[test]
fn documented_examples() {
    let nine_am = TimeOfDay::new(9, 0, Meridiem::Am).unwrap();
    let five_pm = TimeOfDay::new(5, 0, Meridiem::Pm).unwrap();
    assert_eq!(compute(nine_am, Some(five_pm), None).unwrap().to_string(), "8h 0m");

    let eleven_pm = TimeOfDay::new(11, 0, Meridiem::Pm).unwrap();
    assert_eq!(compute(eleven_pm, None, Some(3)).unwrap().to_string(), "2:00 AM");

    assert!(compute(nine_am, Some(five_pm), Some(1)).is_err());
}
