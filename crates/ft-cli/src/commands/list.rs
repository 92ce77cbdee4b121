//! List command: the dated entries of one day-off category.

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use ft_core::days_off::entries_in_year;
use ft_core::{Config, DayOff, DayOffKind, DayPortion};

use crate::cli::ListArgs;

/// JSON output row for `ft list`.
#[derive(Debug, Serialize)]
pub struct ListEntry<'a> {
    pub date: NaiveDate,
    pub description: &'a str,
    pub portion: DayPortion,
}

const fn plural(kind: DayOffKind) -> &'static str {
    match kind {
        DayOffKind::Holiday => "holidays",
        DayOffKind::Vacation => "vacation days",
        DayOffKind::Sick => "sick days",
    }
}

/// Formats one line per entry, or a note when there are none.
pub fn format_entries(kind: DayOffKind, year: i32, entries: &[(NaiveDate, &DayOff)]) -> String {
    if entries.is_empty() {
        return format!("No {} in {year}\n", plural(kind));
    }

    entries
        .iter()
        .map(|(date, day_off)| match day_off.portion {
            DayPortion::Full => format!("{date}  {}\n", day_off.description),
            DayPortion::Half => format!("{date}  {} (half)\n", day_off.description),
        })
        .collect()
}

/// Runs the list command.
pub fn run<W: Write>(writer: &mut W, args: &ListArgs, config: &Config, today: NaiveDate) -> Result<()> {
    let kind = DayOffKind::from(args.kind);
    let year = args.year.unwrap_or_else(|| today.year());
    let entries = entries_in_year(kind, year, config);

    if args.json {
        let rows: Vec<ListEntry<'_>> = entries
            .iter()
            .map(|(date, day_off)| ListEntry {
                date: *date,
                description: &day_off.description,
                portion: day_off.portion,
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(writer, "{}", format_entries(kind, year, &entries))?;
    }

    Ok(())
}
