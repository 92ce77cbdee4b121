//! Balance command: expected versus logged working time.
//!
//! This module implements `ft balance` with an explicit range (--from, --to)
//! or a period shortcut (--day, --week, --month, --year) and output formats
//! (human-readable, JSON).

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

use ft_core::{BalanceReport, BalanceReporter, Config, DateRange, LedgerProvider, format_duration};

use crate::cli::BalanceArgs;

/// Period shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    fn from_args(args: &BalanceArgs) -> Option<Self> {
        if args.day {
            Some(Self::Day)
        } else if args.week {
            Some(Self::Week)
        } else if args.month {
            Some(Self::Month)
        } else if args.year {
            Some(Self::Year)
        } else {
            None
        }
    }

    /// First day of the period containing `today`.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => today,
            Self::Week => today - Duration::days(i64::from(today.weekday().num_days_from_monday())),
            Self::Month => today.with_day(1).unwrap_or(today),
            Self::Year => today.with_ordinal(1).unwrap_or(today),
        }
    }
}

/// Picks the reported range from the arguments.
///
/// Without arguments the range runs from the configured start date through
/// today. Period shortcuts never start before the configured start date.
pub fn resolve_range(args: &BalanceArgs, config: &Config, today: NaiveDate) -> Result<DateRange> {
    let (start, end) = match Period::from_args(args) {
        Some(period) => (period.start(today).max(config.start_date), today),
        None => (
            args.from.unwrap_or(config.start_date),
            args.to.unwrap_or(today),
        ),
    };

    DateRange::new(start, end).context("invalid date range")
}

/// Formats the human-readable balance.
pub fn format_report(report: &BalanceReport) -> String {
    let expected = format_seconds(report.balance.expected_seconds);
    let actual = format_seconds(report.balance.actual_seconds);
    let remaining = format_seconds(report.balance.remaining_seconds);
    let marker = if report.balance.is_overtime() {
        " (overtime)"
    } else {
        ""
    };

    let width = expected.len().max(actual.len()).max(remaining.len());

    format!(
        "Balance: {range}\nTracked since: {since}\n\nExpected:  {expected:>width$}\nActual:    {actual:>width$}\nRemaining: {remaining:>width$}{marker}\n",
        range = report.range,
        since = report.ledger_start_date,
    )
}

#[allow(clippy::cast_possible_truncation)]
fn format_seconds(seconds: f64) -> String {
    format_duration(seconds.round() as i64)
}

/// Runs the balance command.
pub fn run<W: Write, L: LedgerProvider>(
    writer: &mut W,
    args: &BalanceArgs,
    config: &Config,
    ledger: L,
    today: NaiveDate,
) -> Result<()> {
    let range = resolve_range(args, config, today)?;
    let report = BalanceReporter::new(ledger)
        .report(config, range, today)
        .context("failed to compute balance")?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }

    Ok(())
}
