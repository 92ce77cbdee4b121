//! Flex time balance: expected work minus logged work.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::ledger::LedgerProvider;
use crate::range::{DateRange, RangeError};
use crate::working_hours::{expected_seconds, expected_seconds_in};

/// Errors while producing a balance report.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// The ledger could not be queried or answered with garbage.
    #[error("failed to fetch logged time from the ledger")]
    Ledger(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Expected versus actual working time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balance {
    pub expected_seconds: f64,
    pub actual_seconds: f64,
    /// `expected - actual`. Negative values are overtime.
    pub remaining_seconds: f64,
}

impl Balance {
    pub fn new(expected_seconds: f64, actual_seconds: f64) -> Self {
        Self {
            expected_seconds,
            actual_seconds,
            remaining_seconds: expected_seconds - actual_seconds,
        }
    }

    pub fn is_overtime(&self) -> bool {
        self.remaining_seconds < 0.0
    }
}

/// Balance from the configured start date through `end_date`.
pub fn balance(end_date: NaiveDate, config: &Config, actual_seconds: f64) -> Result<Balance, RangeError> {
    Ok(Balance::new(expected_seconds(end_date, config)?, actual_seconds))
}

/// Balance over an explicit range.
pub fn balance_in(range: &DateRange, config: &Config, actual_seconds: f64) -> Balance {
    Balance::new(expected_seconds_in(range, config), actual_seconds)
}

/// A balance together with the range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceReport {
    pub range: DateRange,
    /// Earliest date the ledger had entries for.
    pub ledger_start_date: NaiveDate,
    #[serde(flatten)]
    pub balance: Balance,
}

/// Composes expected hours with logged time from a ledger.
#[derive(Debug)]
pub struct BalanceReporter<L> {
    ledger: L,
}

impl<L: LedgerProvider> BalanceReporter<L> {
    pub const fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Builds the report for `range`, querying the ledger exactly once.
    ///
    /// When the range reaches `today` the ledger is asked for everything up
    /// to the current moment, so a running timer counts.
    pub fn report(
        &self,
        config: &Config,
        range: DateRange,
        today: NaiveDate,
    ) -> Result<BalanceReport, BalanceError> {
        let until = (range.end() < today).then_some(range.end());
        let summary = self
            .ledger
            .fetch_summary(range.start(), until)
            .map_err(|err| BalanceError::Ledger(Box::new(err)))?;

        let balance = balance_in(&range, config, summary.total_seconds);
        tracing::debug!(?balance, ledger_start_date = %summary.start_date, "computed balance");

        Ok(BalanceReport {
            range,
            ledger_start_date: summary.start_date,
            balance,
        })
    }
}
