mod compute;
pub mod input;
mod state;
mod widget;

pub use compute::{compute, Offset, Outcome, Readout, NO_RESULT, PROMPT};
pub use state::CalculatorState;
pub use widget::HoursCalculator;
