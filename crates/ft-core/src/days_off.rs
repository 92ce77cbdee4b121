//! Yearly accounting of vacation and sick days against their allowances.
//!
//! Unlike the expected-hours calculation, nothing here looks at the
//! configured start date: a day off counts against its year's allowance
//! wherever it falls.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::{Config, DayOff, DayOffKind, DaysOff};

/// Allowed, taken and remaining days for one category and year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaysOffSummary {
    pub allowed: f64,
    pub taken: f64,
    /// `allowed - taken`; negative when the allowance is overdrawn.
    pub left: f64,
}

impl DaysOffSummary {
    fn new(allowed: u32, taken: f64) -> Self {
        let allowed = f64::from(allowed);
        Self {
            allowed,
            taken,
            left: allowed - taken,
        }
    }
}

/// Vacation days allowed, taken and left in `year`.
pub fn vacation_summary(year: i32, config: &Config) -> DaysOffSummary {
    DaysOffSummary::new(
        config.allowed_days_off.vacation_days,
        taken_in_year(&config.vacation_days, year),
    )
}

/// Sick days allowed, taken and left in `year`.
pub fn sick_summary(year: i32, config: &Config) -> DaysOffSummary {
    DaysOffSummary::new(
        config.allowed_days_off.sick_days,
        taken_in_year(&config.sick_days, year),
    )
}

/// Holidays in `year`, half days counting 0.5.
pub fn holiday_count(year: i32, config: &Config) -> f64 {
    taken_in_year(&config.holidays, year)
}

/// Entries of one category dated in `year`, in date order.
pub fn entries_in_year(kind: DayOffKind, year: i32, config: &Config) -> Vec<(NaiveDate, &DayOff)> {
    in_year(config.days_off(kind), year)
        .map(|(&date, day_off)| (date, day_off))
        .collect()
}

fn taken_in_year(days_off: &DaysOff, year: i32) -> f64 {
    in_year(days_off, year)
        .map(|(_, day_off)| day_off.portion.factor())
        .sum()
}

fn in_year(days_off: &DaysOff, year: i32) -> impl Iterator<Item = (&NaiveDate, &DayOff)> {
    days_off.iter().filter(move |(date, _)| date.year() == year)
}
