//! The capability to ask an external time ledger how much work was logged.

use chrono::NaiveDate;
use serde::Serialize;

/// Logged work reported by a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerSummary {
    /// Date of the earliest entry the ledger actually returned.
    pub start_date: NaiveDate,
    /// Total logged seconds.
    pub total_seconds: f64,
}

/// A source of actual logged time.
///
/// Implementations may block (e.g. by running an external program). They are
/// called at most once per report and their errors are not retried.
pub trait LedgerProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Summarizes work logged from `since` through `until` (inclusive), or
    /// through the current moment when `until` is `None`.
    fn fetch_summary(
        &self,
        since: NaiveDate,
        until: Option<NaiveDate>,
    ) -> Result<LedgerSummary, Self::Error>;
}

impl<L: LedgerProvider + ?Sized> LedgerProvider for &L {
    type Error = L::Error;

    fn fetch_summary(
        &self,
        since: NaiveDate,
        until: Option<NaiveDate>,
    ) -> Result<LedgerSummary, Self::Error> {
        (**self).fetch_summary(since, until)
    }
}
