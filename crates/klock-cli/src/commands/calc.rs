use clap::{Subcommand, ValueEnum};
use klock_core::calculator::input::{ADD_HOURS, HOUR, MINUTE};
use klock_core::storage::Database;
use klock_core::{HoursCalculator, Meridiem, SystemClock};
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum CalcAction {
    /// Print every field and the result
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Use the custom start time instead of the live clock
    Custom {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Set the custom start time (pass "" to clear a field)
    Start {
        /// Hour, 1-12
        hour: String,
        /// Minute, 0-59
        minute: String,
        /// AM or PM
        meridiem: Option<Meridiem>,
    },
    /// Measure the time until a target (clears hours to add)
    Target {
        /// Hour, 1-12
        hour: String,
        /// Minute, 0-59 (empty means 0)
        minute: Option<String>,
        /// AM or PM
        meridiem: Option<Meridiem>,
    },
    /// Find the time a number of hours from the start (clears the target)
    Add {
        /// Whole hours, 0-999
        hours: String,
    },
    /// Empty the target time fields
    ClearTarget,
    /// Empty the hours-to-add field
    ClearAdd,
    /// Reset every field to its default
    Reset,
}

#[derive(Serialize)]
struct CalcView<'a> {
    now: String,
    state: &'a klock_core::CalculatorState,
    readout: &'a klock_core::Readout,
}

pub fn run(action: CalcAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut calc = HoursCalculator::load(&db, SystemClock)?;

    match action {
        CalcAction::Show { json } => {
            if json {
                let view = CalcView {
                    now: calc.current_time_display(),
                    state: calc.state(),
                    readout: calc.readout(),
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_fields(&calc);
            }
            return Ok(());
        }
        CalcAction::Custom { state } => {
            calc.set_use_custom_start(matches!(state, Toggle::On))?;
        }
        CalcAction::Start {
            hour,
            minute,
            meridiem,
        } => {
            let hour = HOUR.parse(&hour)?;
            let minute = MINUTE.parse(&minute)?;
            calc.set_start_hour(hour)?;
            calc.set_start_minute(minute)?;
            if let Some(meridiem) = meridiem {
                calc.set_start_meridiem(meridiem)?;
            }
        }
        CalcAction::Target {
            hour,
            minute,
            meridiem,
        } => {
            let hour = HOUR.parse(&hour)?;
            let minute = match minute {
                Some(raw) => MINUTE.parse(&raw)?,
                None => None,
            };
            calc.set_target_hour(hour)?;
            calc.set_target_minute(minute)?;
            if let Some(meridiem) = meridiem {
                calc.set_target_meridiem(meridiem)?;
            }
        }
        CalcAction::Add { hours } => {
            let hours = ADD_HOURS.parse(&hours)?;
            calc.set_add_hours(hours)?;
        }
        CalcAction::ClearTarget => {
            calc.set_target_hour(None)?;
            calc.set_target_minute(None)?;
        }
        CalcAction::ClearAdd => {
            calc.set_add_hours(None)?;
        }
        CalcAction::Reset => {
            calc.reset()?;
        }
    }

    println!("{}", calc.readout());
    Ok(())
}

fn print_fields<S: klock_core::KvStore>(calc: &HoursCalculator<S, SystemClock>) {
    let state = calc.state();
    let field = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "--".into());

    println!("Now:        {}", calc.current_time_display());
    if state.use_custom_start {
        println!("Start:      {} (custom)", state.custom_start());
    } else {
        println!("Start:      now");
    }
    println!(
        "Target:     {}:{} {}",
        field(state.target_hour),
        field(state.target_minute),
        state.target_meridiem
    );
    println!("Add hours:  {}", field(state.add_hours));
    match &calc.readout().error {
        Some(error) => println!("Result:     {} ({error})", calc.readout().output),
        None => println!("Result:     {}", calc.readout().output),
    }
}
