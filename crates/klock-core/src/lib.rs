//! # Klock Core Library
//!
//! This library provides the logic behind the Klock widgets: an hours
//! calculator and a focus-session countdown. The `klock` CLI is a thin front
//! end over the same library.
//!
//! ## Architecture
//!
//! - **Calculator**: time-of-day arithmetic over 12-hour readings, wrapped in
//!   a component that persists every accepted edit
//! - **Focus**: a one-second-tick countdown state machine; the caller drives
//!   `tick()`
//! - **Storage**: string key/value store (SQLite or in-memory) and TOML
//!   configuration
//! - **Ticker**: cancellable tokio interval for the live clock and countdown
//!
//! ## Key Components
//!
//! - [`HoursCalculator`]: Calculator component
//! - [`FocusSession`]: Countdown state machine
//! - [`KvStore`]: Durable key/value seam
//! - [`Config`]: Application configuration management
//! - [`Notifier`]: Receiver of session lifecycle events

pub mod calculator;
pub mod error;
pub mod events;
pub mod focus;
pub mod notify;
pub mod storage;
pub mod ticker;
pub mod time;

pub use calculator::{compute, CalculatorState, HoursCalculator, Offset, Outcome, Readout};
pub use error::{CalcError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use focus::{FocusSession, SessionState};
pub use notify::{Notifier, TracingNotifier};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use ticker::{Ticker, TICK_PERIOD};
pub use time::{FixedClock, Meridiem, SystemClock, TimeOfDay, WallClock};
