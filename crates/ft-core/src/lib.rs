//! Core calculations for flex time tracking.
//!
//! This crate contains the pure logic for:
//! - Working hours: expected work duration over a date range
//! - Days off: yearly vacation and sick day allowances
//! - Balance: expected minus logged time, with the ledger abstracted away
//!
//! Nothing here performs I/O; the configuration is loaded and the ledger is
//! queried by the caller.

pub mod balance;
pub mod config;
pub mod days_off;
pub mod duration;
pub mod ledger;
mod range;
pub mod working_hours;

pub use balance::{Balance, BalanceError, BalanceReport, BalanceReporter};
pub use config::{
    AllowedDaysOff, Config, ConfigError, ConfigFile, DayOff, DayOffKind, DayPortion, LedgerSettings,
    WorkingDays,
};
pub use days_off::DaysOffSummary;
pub use duration::{DurationParseError, format_duration, parse_duration};
pub use ledger::{LedgerProvider, LedgerSummary};
pub use range::{DateRange, RangeError};
