//! Flex time CLI library.
//!
//! This crate provides the CLI interface for the flex time tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{BalanceArgs, Cli, Commands, DaysOffArgs, ListArgs, ListKind};
pub use config::{dirs_config_path, load_from};
