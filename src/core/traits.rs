//! Core traits for the evaluation engine
//!
//! The only external input the pipeline consults besides the request itself
//! is the current date, used to decide whether a dated instruction is due.
//! It is abstracted behind `Clock` so runs can be pinned to a fixed day.

use chrono::{NaiveDate, Utc};

/// Source of "today" for scheduling decisions
///
/// Implementations must return a calendar day in UTC.
pub trait Clock: Send + Sync {
    /// The current UTC calendar day
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a single day
///
/// Used by the `--today` flag and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
