//! Timewarrior as the ledger of logged work.
//!
//! Runs `timew export` and sums the exported intervals. Intervals are clipped
//! to the requested days in the configured time zone; an interval without an
//! end (a running timer) counts until now.
//!
//! # Export Format
//!
//! `timew export` prints a JSON array of intervals:
//!
//! ```json
//! [{"id": 2, "start": "20240101T080000Z", "end": "20240101T120000Z", "tags": ["work"]}]
//! ```
//!
//! Only `start` and `end` are read.

use std::process::{Command, ExitStatus};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use ft_core::{LedgerProvider, LedgerSummary};

/// Timestamp layout used by `timew export`.
const TIMEW_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Days added on each side of the `timew export` query.
///
/// Timewarrior reads bare dates in the host's zone, which can be up to 26
/// hours away from the configured one; `summarize` does the exact clipping.
const EXPORT_MARGIN_DAYS: i64 = 2;

/// Ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger program could not be started.
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The ledger program exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    /// The export was not a JSON array of intervals.
    #[error("malformed ledger export")]
    Json(#[from] serde_json::Error),
    /// An interval timestamp could not be parsed.
    #[error("invalid ledger timestamp `{value}`")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// An interval ends before it starts.
    #[error("ledger interval ends before it starts: {start} to {end}")]
    ReversedInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// One exported interval.
#[derive(Debug, Deserialize)]
struct ExportedInterval {
    start: String,
    end: Option<String>,
}

/// Queries Timewarrior through its command-line interface.
#[derive(Debug, Clone)]
pub struct TimewarriorLedger {
    command: String,
    time_zone: Tz,
}

impl TimewarriorLedger {
    pub fn new(command: impl Into<String>, time_zone: Tz) -> Self {
        Self {
            command: command.into(),
            time_zone,
        }
    }

    /// Arguments for `timew export` covering `since` through `until`, with
    /// [`EXPORT_MARGIN_DAYS`] to spare on both ends.
    fn export_args(since: NaiveDate, until: Option<NaiveDate>) -> Vec<String> {
        let margin = Duration::days(EXPORT_MARGIN_DAYS);
        let mut args = vec![
            "export".to_string(),
            "from".to_string(),
            (since - margin).to_string(),
        ];
        if let Some(until) = until {
            args.push("to".to_string());
            args.push((until + Duration::days(1) + margin).to_string());
        }
        args
    }

    fn export(&self, args: &[String]) -> Result<String, LedgerError> {
        let command_line = format!("{} {}", self.command, args.join(" "));
        tracing::debug!(command = %command_line, "querying ledger");

        let output = Command::new(&self.command)
            .args(args)
            .output()
            .map_err(|source| LedgerError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LedgerError::Failed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl LedgerProvider for TimewarriorLedger {
    type Error = LedgerError;

    fn fetch_summary(
        &self,
        since: NaiveDate,
        until: Option<NaiveDate>,
    ) -> Result<LedgerSummary, Self::Error> {
        let export = self.export(&Self::export_args(since, until))?;
        summarize(&export, since, until, Utc::now(), self.time_zone)
    }
}

/// Sums a `timew export` document.
///
/// Intervals are clipped to `[since, until]` (whole days in `time_zone`),
/// open intervals end at `now`.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(
    export: &str,
    since: NaiveDate,
    until: Option<NaiveDate>,
    now: DateTime<Utc>,
    time_zone: Tz,
) -> Result<LedgerSummary, LedgerError> {
    let intervals: Vec<ExportedInterval> = serde_json::from_str(export)?;

    let window_start = local_midnight(time_zone, since);
    let window_end = until.map_or(now, |until| local_midnight(time_zone, until + Duration::days(1)));

    let mut total_seconds: i64 = 0;
    let mut earliest: Option<DateTime<Utc>> = None;

    for interval in &intervals {
        let start = parse_timestamp(&interval.start)?;
        let end = interval.end.as_deref().map_or(Ok(now), parse_timestamp)?;
        if end < start {
            return Err(LedgerError::ReversedInterval { start, end });
        }

        let clipped_start = start.max(window_start);
        let clipped_end = end.min(window_end);
        if clipped_end <= clipped_start {
            continue;
        }

        total_seconds += (clipped_end - clipped_start).num_seconds();
        earliest = Some(earliest.map_or(clipped_start, |e| e.min(clipped_start)));
    }

    let start_date = earliest.map_or(since, |e| e.with_timezone(&time_zone).date_naive());
    tracing::debug!(
        intervals = intervals.len(),
        total_seconds,
        %start_date,
        "summarized ledger export"
    );

    Ok(LedgerSummary {
        start_date,
        total_seconds: total_seconds as f64,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, LedgerError> {
    NaiveDateTime::parse_from_str(value, TIMEW_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| LedgerError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Start of `date` in `time_zone`.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight(time_zone: Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // A DST gap at midnight moves the start of the day to 01:00.
    [midnight, midnight + Duration::hours(1)]
        .into_iter()
        .find_map(|local| time_zone.from_local_datetime(&local).earliest())
        .map_or_else(|| midnight.and_utc(), |start| start.with_timezone(&Utc))
}
