//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use ft_core::DayOffKind;

/// Flex time tracker.
///
/// Compares logged work against the expected working hours and keeps count
/// of vacation and sick days.
#[derive(Debug, Parser)]
#[command(name = "ft", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true, env = "FLEXTIME_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show expected, logged and remaining working time.
    Balance(BalanceArgs),

    /// Show vacation and sick days allowed, taken and left for a year.
    #[command(name = "daysoff")]
    DaysOff(DaysOffArgs),

    /// List holidays, vacation days or sick days.
    List(ListArgs),
}

/// Arguments for `ft balance`.
#[derive(Debug, Default, Args)]
#[command(group(ArgGroup::new("period").args(["day", "week", "month", "year"])))]
pub struct BalanceArgs {
    /// First day of the range (default: the configured start date).
    #[arg(long, conflicts_with = "period")]
    pub from: Option<NaiveDate>,

    /// Last day of the range (default: today).
    #[arg(long, conflicts_with = "period")]
    pub to: Option<NaiveDate>,

    /// Only today.
    #[arg(long)]
    pub day: bool,

    /// The current week, from Monday.
    #[arg(long)]
    pub week: bool,

    /// The current month.
    #[arg(long)]
    pub month: bool,

    /// The current year.
    #[arg(long)]
    pub year: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `ft daysoff`.
#[derive(Debug, Default, Args)]
pub struct DaysOffArgs {
    /// Year to report (default: the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `ft list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which days off to list.
    #[arg(value_enum)]
    pub kind: ListKind,

    /// Year to list (default: the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Day-off categories as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Holidays,
    Vacation,
    Sick,
}

impl From<ListKind> for DayOffKind {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Holidays => Self::Holiday,
            ListKind::Vacation => Self::Vacation,
            ListKind::Sick => Self::Sick,
        }
    }
}
