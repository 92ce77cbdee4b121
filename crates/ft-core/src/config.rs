//! Configuration model.
//!
//! [`ConfigFile`] mirrors the on-disk TOML shape, including the `" (h)"`
//! half-day suffix on day-off descriptions. [`Config`] is the validated,
//! immutable value every calculation reads; it carries the half-day flag as
//! [`DayPortion`] and never looks at description text.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::{DurationParseError, parse_duration};

/// Description suffix that marks a half day in the config file.
pub const HALF_DAY_SUFFIX: &str = " (h)";

/// Ledger executable used when the config file names none.
pub const DEFAULT_LEDGER_COMMAND: &str = "timew";

/// Errors raised while turning a [`ConfigFile`] into a [`Config`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The time zone is not a known IANA identifier.
    #[error("invalid time zone `{value}`")]
    InvalidTimeZone { value: String },

    /// The time adjustment could not be parsed.
    #[error("invalid time_adjustment")]
    InvalidTimeAdjustment(#[from] DurationParseError),

    /// A weekday has negative or non-finite expected hours.
    #[error("invalid working hours for {weekday}: {hours}")]
    InvalidWorkingHours { weekday: Weekday, hours: f64 },
}

/// How much of a day an entry takes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPortion {
    Half,
    Full,
}

impl DayPortion {
    /// Share of a working day this portion removes.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }
}

impl fmt::Display for DayPortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Half => write!(f, "half"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// The category of a day off.
///
/// Ordered by precedence: when one date is listed in several categories,
/// the greatest kind names the merged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOffKind {
    Holiday,
    Vacation,
    Sick,
}

impl DayOffKind {
    pub const ALL: [Self; 3] = [Self::Holiday, Self::Vacation, Self::Sick];
}

impl fmt::Display for DayOffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Holiday => write!(f, "holiday"),
            Self::Vacation => write!(f, "vacation"),
            Self::Sick => write!(f, "sick"),
        }
    }
}

/// A single dated day off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOff {
    pub description: String,
    pub portion: DayPortion,
}

impl DayOff {
    /// Parses a config-file label, stripping the half-day suffix if present.
    pub fn from_label(label: &str) -> Self {
        match label.strip_suffix(HALF_DAY_SUFFIX) {
            Some(description) => Self {
                description: description.to_string(),
                portion: DayPortion::Half,
            },
            None => Self {
                description: label.to_string(),
                portion: DayPortion::Full,
            },
        }
    }
}

/// Days off of one category, keyed by date.
pub type DaysOff = BTreeMap<NaiveDate, DayOff>;

/// One date of the merged day-off calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEntry {
    pub kind: DayOffKind,
    pub portion: DayPortion,
}

/// Expected working hours per ISO weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingDays {
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
    pub saturday: f64,
    pub sunday: f64,
}

impl WorkingDays {
    /// Expected hours on the given weekday.
    pub const fn hours_for(&self, weekday: Weekday) -> f64 {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Sum of all seven weekdays.
    pub fn weekly_hours(&self) -> f64 {
        WEEKDAYS.iter().map(|&day| self.hours_for(day)).sum()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for weekday in WEEKDAYS {
            let hours = self.hours_for(weekday);
            if !hours.is_finite() || hours < 0.0 {
                return Err(ConfigError::InvalidWorkingHours { weekday, hours });
            }
        }
        Ok(())
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Yearly allowances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedDaysOff {
    pub sick_days: u32,
    pub vacation_days: u32,
}

/// Settings for the external ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Executable invoked to export logged time.
    #[serde(default = "default_ledger_command")]
    pub command: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            command: default_ledger_command(),
        }
    }
}

fn default_ledger_command() -> String {
    DEFAULT_LEDGER_COMMAND.to_string()
}

fn default_time_adjustment() -> String {
    "0s".to_string()
}

/// The configuration file as written by the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigFile {
    pub start_date: NaiveDate,
    pub time_zone: String,
    #[serde(default = "default_time_adjustment")]
    pub time_adjustment: String,
    pub working_days: WorkingDays,
    #[serde(default)]
    pub holidays: BTreeMap<NaiveDate, String>,
    #[serde(default)]
    pub vacation_days: BTreeMap<NaiveDate, String>,
    #[serde(default)]
    pub sick_days: BTreeMap<NaiveDate, String>,
    pub allowed_days_off: AllowedDaysOff,
    #[serde(default)]
    pub ledger: LedgerSettings,
}

/// Validated configuration, read-only for the lifetime of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub time_zone: Tz,
    pub start_date: NaiveDate,
    pub time_adjustment_seconds: i64,
    pub working_days: WorkingDays,
    pub holidays: DaysOff,
    pub vacation_days: DaysOff,
    pub sick_days: DaysOff,
    pub allowed_days_off: AllowedDaysOff,
    pub ledger: LedgerSettings,
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let time_zone: Tz = file
            .time_zone
            .parse()
            .map_err(|_| ConfigError::InvalidTimeZone {
                value: file.time_zone.clone(),
            })?;
        let time_adjustment_seconds = parse_duration(&file.time_adjustment)?;
        file.working_days.validate()?;

        let config = Self {
            time_zone,
            start_date: file.start_date,
            time_adjustment_seconds,
            working_days: file.working_days,
            holidays: parse_labels(&file.holidays),
            vacation_days: parse_labels(&file.vacation_days),
            sick_days: parse_labels(&file.sick_days),
            allowed_days_off: file.allowed_days_off,
            ledger: file.ledger,
        };

        let collisions = config.collisions();
        if !collisions.is_empty() {
            let calendar = config.day_off_calendar();
            for (date, kinds) in collisions {
                tracing::warn!(
                    %date,
                    ?kinds,
                    kept = ?calendar.get(&date),
                    "date listed in several day-off categories; counting it once"
                );
            }
        }

        Ok(config)
    }
}

fn parse_labels(labels: &BTreeMap<NaiveDate, String>) -> DaysOff {
    labels
        .iter()
        .map(|(&date, label)| (date, DayOff::from_label(label)))
        .collect()
}

impl Config {
    /// The entries of one category.
    pub const fn days_off(&self, kind: DayOffKind) -> &DaysOff {
        match kind {
            DayOffKind::Holiday => &self.holidays,
            DayOffKind::Vacation => &self.vacation_days,
            DayOffKind::Sick => &self.sick_days,
        }
    }

    /// The calendar date of `now` in the configured time zone.
    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.time_zone).date_naive()
    }

    /// Merges all categories into one entry per date.
    ///
    /// A date listed more than once keeps the larger portion and the kind
    /// with the highest precedence (sick, then vacation, then holiday).
    pub fn day_off_calendar(&self) -> BTreeMap<NaiveDate, CalendarEntry> {
        let mut calendar: BTreeMap<NaiveDate, CalendarEntry> = BTreeMap::new();

        for kind in DayOffKind::ALL {
            for (&date, day_off) in self.days_off(kind) {
                calendar
                    .entry(date)
                    .and_modify(|existing| {
                        existing.kind = existing.kind.max(kind);
                        existing.portion = existing.portion.max(day_off.portion);
                    })
                    .or_insert(CalendarEntry {
                        kind,
                        portion: day_off.portion,
                    });
            }
        }

        calendar
    }

    /// Dates that appear in more than one category, with the categories.
    pub fn collisions(&self) -> Vec<(NaiveDate, Vec<DayOffKind>)> {
        let mut seen: BTreeMap<NaiveDate, Vec<DayOffKind>> = BTreeMap::new();
        for kind in DayOffKind::ALL {
            for &date in self.days_off(kind).keys() {
                seen.entry(date).or_default().push(kind);
            }
        }
        seen.into_iter()
            .filter(|(_, kinds)| kinds.len() > 1)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub const fn office_week() -> WorkingDays {
        WorkingDays {
            monday: 8.0,
            tuesday: 8.0,
            wednesday: 8.0,
            thursday: 8.0,
            friday: 8.0,
            saturday: 0.0,
            sunday: 0.0,
        }
    }

    pub fn config(start_date: NaiveDate, working_days: WorkingDays) -> Config {
        Config {
            time_zone: chrono_tz::UTC,
            start_date,
            time_adjustment_seconds: 0,
            working_days,
            holidays: DaysOff::new(),
            vacation_days: DaysOff::new(),
            sick_days: DaysOff::new(),
            allowed_days_off: AllowedDaysOff {
                sick_days: 30,
                vacation_days: 30,
            },
            ledger: LedgerSettings::default(),
        }
    }

    pub fn full(description: &str) -> DayOff {
        DayOff {
            description: description.to_string(),
            portion: DayPortion::Full,
        }
    }

    pub fn half(description: &str) -> DayOff {
        DayOff {
            description: description.to_string(),
            portion: DayPortion::Half,
        }
    }
}
