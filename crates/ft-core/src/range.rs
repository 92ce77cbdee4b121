//! Inclusive calendar date ranges.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Errors for ranges whose endpoints are out of order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// A range of calendar days, inclusive of both endpoints.
///
/// The end is never before the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::date;

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn test_rejects_reversed_range() {
        assert_eq!(
            DateRange::new(date(2024, 1, 2), date(2024, 1, 1)),
            Err(RangeError::EndBeforeStart {
                start: date(2024, 1, 2),
                end: date(2024, 1, 1),
            })
        );
    }

    #[test]
    fn test_days_across_leap_day() {
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
        assert_eq!(range.days(), 3);
    }
}
