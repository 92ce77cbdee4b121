//! Expected working time over a date range.
//!
//! # Algorithm Summary
//!
//! 1. Count the days in the inclusive range and split them into full weeks
//!    and a remainder.
//! 2. Every full week contributes the weekly total, whichever weekday the
//!    range starts on.
//! 3. The remainder is taken as the last days of the range, each contributing
//!    its weekday's hours.
//! 4. Days off inside the range subtract their portion of that weekday's hours.
//! 5. The configured time adjustment is subtracted.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::{Config, WorkingDays};
use crate::range::{DateRange, RangeError};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Expected seconds of work from the configured start date through `end_date`.
pub fn expected_seconds(end_date: NaiveDate, config: &Config) -> Result<f64, RangeError> {
    let range = DateRange::new(config.start_date, end_date)?;
    Ok(expected_seconds_in(&range, config))
}

/// Expected seconds of work over `range`.
#[allow(clippy::cast_precision_loss)]
pub fn expected_seconds_in(range: &DateRange, config: &Config) -> f64 {
    let days = range.days();
    let full_weeks = days / 7;
    let remaining_days = days % 7;

    let full_week_hours = full_weeks as f64 * config.working_days.weekly_hours();
    let remaining_days_hours =
        remaining_days_hours(remaining_days, range.end(), &config.working_days);
    let days_off_hours = days_off_hours(range, config);
    let time_adjustment_hours = config.time_adjustment_seconds as f64 / SECONDS_PER_HOUR;

    let hours = full_week_hours + remaining_days_hours - time_adjustment_hours - days_off_hours;

    tracing::debug!(
        %range,
        full_weeks,
        remaining_days,
        full_week_hours,
        remaining_days_hours,
        days_off_hours,
        time_adjustment_hours,
        "computed expected hours"
    );

    hours * SECONDS_PER_HOUR
}

/// Hours of the last `remaining_days` days ending at `end_date`.
fn remaining_days_hours(remaining_days: i64, end_date: NaiveDate, working_days: &WorkingDays) -> f64 {
    (0..remaining_days)
        .map(|offset| end_date - Duration::days(offset))
        .map(|date| working_days.hours_for(date.weekday()))
        .sum()
}

/// Hours removed by days off that fall inside `range`.
fn days_off_hours(range: &DateRange, config: &Config) -> f64 {
    config
        .day_off_calendar()
        .range(range.start()..=range.end())
        .map(|(date, entry)| entry.portion.factor() * config.working_days.hours_for(date.weekday()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::*;
    use crate::config::{DayOffKind, DayPortion};

    use proptest::prelude::*;

    const HOUR: f64 = SECONDS_PER_HOUR;

    fn assert_hours(actual_seconds: f64, expected_hours: f64) {
        assert!(
            (actual_seconds - expected_hours * HOUR).abs() < 1e-6,
            "expected {expected_hours}h, got {}h",
            actual_seconds / HOUR
        );
    }

    fn short_week() -> WorkingDays {
        WorkingDays {
            monday: 8.0,
            tuesday: 6.0,
            wednesday: 5.0,
            thursday: 0.0,
            friday: 0.0,
            saturday: 0.0,
            sunday: 0.0,
        }
    }

    #[test]
    fn test_counts_whole_end_date() {
        // 2024-01-01 is a Monday
        let config = config(date(2024, 1, 1), short_week());

        let cases = [
            (date(2024, 1, 1), 8.0),
            (date(2024, 1, 2), 14.0),
            (date(2024, 1, 3), 19.0),
            (date(2024, 1, 4), 19.0),
        ];

        for (end_date, hours) in cases {
            assert_hours(expected_seconds(end_date, &config).unwrap(), hours);
        }
    }

    #[test]
    fn test_covers_multiple_weeks() {
        let config = config(date(2024, 1, 1), short_week());
        assert_hours(expected_seconds(date(2024, 1, 14), &config).unwrap(), 38.0);
    }

    #[test]
    fn test_handles_mid_week_end_date() {
        let config = config(date(2024, 1, 1), short_week());
        assert_hours(
            expected_seconds(date(2024, 1, 16), &config).unwrap(),
            19.0 * 2.0 + 14.0,
        );
    }

    #[test]
    fn test_week_plus_one_day() {
        let config = config(date(2024, 1, 1), office_week());
        assert_hours(expected_seconds(date(2024, 1, 8), &config).unwrap(), 48.0);
    }

    #[test]
    fn test_holiday_subtracts_that_weekdays_hours() {
        let mut config = config(date(2024, 1, 1), office_week());
        config.holidays.insert(date(2024, 1, 1), full("Holiday"));

        assert_hours(expected_seconds(date(2024, 1, 8), &config).unwrap(), 40.0);
    }

    #[test]
    fn test_time_adjustment_is_subtracted() {
        let mut config = config(date(2024, 1, 1), office_week());
        let before = expected_seconds(date(2024, 1, 8), &config).unwrap();
        config.time_adjustment_seconds = 3600;
        let after = expected_seconds(date(2024, 1, 8), &config).unwrap();

        assert!((before - after - 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_considers_each_day_off_category() {
        for kind in DayOffKind::ALL {
            let mut config = config(date(2024, 1, 1), short_week());
            let day_off = full("Off");
            match kind {
                DayOffKind::Holiday => config.holidays.insert(date(2024, 1, 3), day_off),
                DayOffKind::Vacation => config.vacation_days.insert(date(2024, 1, 3), day_off),
                DayOffKind::Sick => config.sick_days.insert(date(2024, 1, 3), day_off),
            };

            assert_hours(
                expected_seconds(date(2024, 1, 16), &config).unwrap(),
                19.0 * 2.0 + 14.0 - 5.0,
            );
        }
    }

    #[test]
    fn test_considers_half_vacation_days() {
        let mut config = config(date(2024, 1, 1), short_week());
        config.vacation_days.insert(date(2024, 1, 3), half("Vacation"));

        assert_hours(
            expected_seconds(date(2024, 1, 16), &config).unwrap(),
            19.0 * 2.0 + 14.0 - 2.5,
        );
    }

    #[test]
    fn test_ignores_days_off_out_of_range() {
        let mut config = config(date(2024, 1, 2), short_week());
        config.vacation_days.insert(date(2024, 1, 1), full("Before start"));
        config.vacation_days.insert(date(2024, 1, 17), full("After end"));

        let without = {
            let mut config = config.clone();
            config.vacation_days.clear();
            expected_seconds(date(2024, 1, 16), &config).unwrap()
        };

        assert!((expected_seconds(date(2024, 1, 16), &config).unwrap() - without).abs() < 1e-9);
    }

    #[test]
    fn test_does_not_count_days_off_twice() {
        let mut config = config(date(2024, 1, 1), short_week());
        config.holidays.insert(date(2024, 1, 3), full("Holiday"));
        config.sick_days.insert(date(2024, 1, 3), full("Sick"));
        config.vacation_days.insert(date(2024, 1, 3), half("Vacation"));

        assert_hours(
            expected_seconds(date(2024, 1, 16), &config).unwrap(),
            19.0 * 2.0 + 14.0 - 5.0,
        );
    }

    #[test]
    fn test_rejects_end_before_start() {
        let config = config(date(2024, 1, 10), office_week());
        assert_eq!(
            expected_seconds(date(2024, 1, 9), &config),
            Err(RangeError::EndBeforeStart {
                start: date(2024, 1, 10),
                end: date(2024, 1, 9),
            })
        );
    }

    #[test]
    fn test_explicit_range_ignores_config_start_date() {
        let config = config(date(2024, 1, 1), office_week());
        let range = DateRange::new(date(2024, 1, 8), date(2024, 1, 12)).unwrap();

        assert_hours(expected_seconds_in(&range, &config), 40.0);
    }

    fn working_days_strategy() -> impl Strategy<Value = WorkingDays> {
        // Quarter hours keep the sums exact in binary floating point.
        prop::array::uniform7(0_u8..=48).prop_map(|quarters| {
            let hours = quarters.map(|q| f64::from(q) / 4.0);
            WorkingDays {
                monday: hours[0],
                tuesday: hours[1],
                wednesday: hours[2],
                thursday: hours[3],
                friday: hours[4],
                saturday: hours[5],
                sunday: hours[6],
            }
        })
    }

    fn start_date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0_i64..20_000).prop_map(|offset| date(2000, 1, 1) + Duration::days(offset))
    }

    proptest! {
        #[test]
        fn prop_expected_seconds_is_pure(
            start in start_date_strategy(),
            length in 0_i64..800,
            working_days in working_days_strategy(),
        ) {
            let config = config(start, working_days);
            let end = start + Duration::days(length);

            let first = expected_seconds(end, &config).unwrap();
            let second = expected_seconds(end, &config).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }

        #[test]
        fn prop_matches_day_by_day_sum(
            start in start_date_strategy(),
            length in 0_i64..800,
            working_days in working_days_strategy(),
        ) {
            let config = config(start, working_days);
            let end = start + Duration::days(length);

            let day_by_day: f64 = (0..=length)
                .map(|offset| working_days.hours_for((start + Duration::days(offset)).weekday()))
                .sum();
            prop_assert!((expected_seconds(end, &config).unwrap() - day_by_day * HOUR).abs() < 1e-6);
        }

        #[test]
        fn prop_whole_weeks_have_no_remainder(
            start in start_date_strategy(),
            weeks in 1_i64..120,
            working_days in working_days_strategy(),
        ) {
            let config = config(start, working_days);
            let end = start + Duration::days(weeks * 7 - 1);

            let expected = weeks as f64 * working_days.weekly_hours() * HOUR;
            prop_assert!((expected_seconds(end, &config).unwrap() - expected).abs() < 1e-6);
        }

        #[test]
        fn prop_half_day_removes_half_of_full_day(
            start in start_date_strategy(),
            length in 0_i64..400,
            offset in 0_i64..400,
            working_days in working_days_strategy(),
        ) {
            let offset = offset.min(length);
            let end = start + Duration::days(length);
            let day = start + Duration::days(offset);

            let base = config(start, working_days);
            let mut with_full = base.clone();
            with_full.sick_days.insert(day, full("Sick"));
            let mut with_half = base.clone();
            with_half.sick_days.insert(day, half("Sick"));

            let baseline = expected_seconds(end, &base).unwrap();
            let full_cut = baseline - expected_seconds(end, &with_full).unwrap();
            let half_cut = baseline - expected_seconds(end, &with_half).unwrap();

            prop_assert!((full_cut - working_days.hours_for(day.weekday()) * HOUR).abs() < 1e-6);
            prop_assert!((full_cut - 2.0 * half_cut).abs() < 1e-6);
        }

        #[test]
        fn prop_days_off_outside_range_are_ignored(
            start in start_date_strategy(),
            length in 0_i64..400,
            distance in 1_i64..400,
            after in any::<bool>(),
            portion in prop_oneof![Just(DayPortion::Full), Just(DayPortion::Half)],
            working_days in working_days_strategy(),
        ) {
            let end = start + Duration::days(length);
            let day = if after { end + Duration::days(distance) } else { start - Duration::days(distance) };

            let base = config(start, working_days);
            let mut with_day_off = base.clone();
            with_day_off.holidays.insert(day, crate::config::DayOff {
                description: "Outside".to_string(),
                portion,
            });

            prop_assert_eq!(
                expected_seconds(end, &base).unwrap().to_bits(),
                expected_seconds(end, &with_day_off).unwrap().to_bits()
            );
        }
    }
}
