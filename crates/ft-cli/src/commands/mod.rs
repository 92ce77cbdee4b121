//! CLI subcommand implementations.

pub mod balance;
pub mod daysoff;
pub mod list;
