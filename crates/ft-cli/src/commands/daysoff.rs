//! Days-off command: yearly vacation and sick day accounting.

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use ft_core::days_off::{holiday_count, sick_summary, vacation_summary};
use ft_core::{Config, DaysOffSummary};

use crate::cli::DaysOffArgs;

/// JSON output for `ft daysoff`.
#[derive(Debug, Serialize)]
pub struct DaysOffReport {
    pub year: i32,
    pub vacation: DaysOffSummary,
    pub sick: DaysOffSummary,
    pub holidays: f64,
}

impl DaysOffReport {
    pub fn new(year: i32, config: &Config) -> Self {
        Self {
            year,
            vacation: vacation_summary(year, config),
            sick: sick_summary(year, config),
            holidays: holiday_count(year, config),
        }
    }
}

/// Formats the human-readable table.
pub fn format_report(report: &DaysOffReport) -> String {
    let mut output = format!("Days off in {}\n\n", report.year);
    output.push_str(&format!("{:<10}{:>8}{:>8}{:>8}\n", "", "Allowed", "Taken", "Left"));
    for (label, summary) in [("Vacation", &report.vacation), ("Sick", &report.sick)] {
        output.push_str(&format!(
            "{label:<10}{:>8}{:>8}{:>8}\n",
            summary.allowed, summary.taken, summary.left
        ));
    }
    output.push_str(&format!("\nHolidays: {}\n", report.holidays));
    output
}

/// Runs the days-off command.
pub fn run<W: Write>(writer: &mut W, args: &DaysOffArgs, config: &Config, today: NaiveDate) -> Result<()> {
    let year = args.year.unwrap_or_else(|| today.year());
    let report = DaysOffReport::new(year, config);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }

    Ok(())
}
