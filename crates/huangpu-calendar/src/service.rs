//! Fail-soft query boundary over the loaded calendar.
//!
//! Every dependent puller calls the calendar through this service. Queries
//! take and return canonical `YYYY-MM-DD` strings. When the snapshot is
//! missing or malformed, or an input does not parse, a query logs one
//! diagnostic naming the operation and returns its empty, absent, or false
//! value. Nothing escalates past this boundary: the dependent jobs are
//! best-effort backfills that skip a bad day rather than abort.
//!
//! Callers that cannot accept degraded answers check [`CalendarService::is_available`]
//! up front and decide for themselves.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::warn;

use huangpu_types::{format_date, parse_date};

use crate::{CalendarError, TradingCalendar, load_snapshot};

/// String-boundary calendar queries with fail-soft degradation.
///
/// The snapshot is read exactly once, at construction; the loaded sequence
/// is immutable for the life of the service.
#[derive(Debug)]
pub struct CalendarService {
    calendar: Option<TradingCalendar>,
    load_error: Option<CalendarError>,
}

impl CalendarService {
    /// Opens the service over a snapshot file.
    ///
    /// A missing or malformed snapshot does not fail construction: the
    /// service comes up absent and every query degrades.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        match load_snapshot(path.as_ref()) {
            Ok(calendar) => Self {
                calendar: Some(calendar),
                load_error: None,
            },
            Err(error) => {
                warn!(%error, "trading calendar unavailable; all queries will degrade");
                Self {
                    calendar: None,
                    load_error: Some(error),
                }
            }
        }
    }

    /// Wraps an already-loaded calendar, bypassing snapshot I/O.
    #[must_use]
    pub const fn from_calendar(calendar: TradingCalendar) -> Self {
        Self {
            calendar: Some(calendar),
            load_error: None,
        }
    }

    /// Returns true if the snapshot loaded and queries answer non-degraded.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.calendar.is_some()
    }

    /// Returns the load failure, if the snapshot could not be loaded.
    #[must_use]
    pub const fn load_error(&self) -> Option<&CalendarError> {
        self.load_error.as_ref()
    }

    /// Returns the loaded calendar for typed queries.
    #[must_use]
    pub const fn calendar(&self) -> Option<&TradingCalendar> {
        self.calendar.as_ref()
    }

    /// Sessions `d` with `start <= d` and, if `end` is given, `d <= end`,
    /// earliest first, truncated to the first `count` entries if `count` is
    /// given.
    ///
    /// Degrades to an empty vec on an absent calendar or an unparseable
    /// input date; `count = 0` is empty by definition.
    #[must_use]
    pub fn trading_dates(
        &self,
        start: &str,
        end: Option<&str>,
        count: Option<usize>,
    ) -> Vec<String> {
        const OP: &str = "trading_dates";
        let Some(calendar) = self.lookup(OP) else {
            return Vec::new();
        };
        let Some(start) = Self::parse_input(OP, "start", start) else {
            return Vec::new();
        };
        let end = match end {
            Some(value) => match Self::parse_input(OP, "end", value) {
                Some(date) => Some(date),
                None => return Vec::new(),
            },
            None => None,
        };
        calendar
            .dates_in_range(start, end, count)
            .iter()
            .copied()
            .map(format_date)
            .collect()
    }

    /// The greatest session on or before today (local time). Today counts
    /// if it is itself a session.
    #[must_use]
    pub fn latest_trading_date(&self) -> Option<String> {
        let today = Local::now().date_naive();
        self.lookup("latest_trading_date")?
            .latest_on_or_before(today)
            .map(format_date)
    }

    /// The greatest session on or before `as_of`.
    #[must_use]
    pub fn latest_trading_date_as_of(&self, as_of: &str) -> Option<String> {
        const OP: &str = "latest_trading_date_as_of";
        let calendar = self.lookup(OP)?;
        let as_of = Self::parse_input(OP, "as_of", as_of)?;
        calendar.latest_on_or_before(as_of).map(format_date)
    }

    /// The session `steps` sessions before `anchor`, rolling a non-session
    /// anchor back to the nearest earlier session first.
    #[must_use]
    pub fn previous_trading_date(&self, anchor: &str, steps: usize) -> Option<String> {
        const OP: &str = "previous_trading_date";
        let calendar = self.lookup(OP)?;
        let anchor = Self::parse_input(OP, "anchor", anchor)?;
        calendar.previous(anchor, steps).map(format_date)
    }

    /// The session `steps` sessions after `anchor`, rolling a non-session
    /// anchor forward to the nearest later session first.
    #[must_use]
    pub fn next_trading_date(&self, anchor: &str, steps: usize) -> Option<String> {
        const OP: &str = "next_trading_date";
        let calendar = self.lookup(OP)?;
        let anchor = Self::parse_input(OP, "anchor", anchor)?;
        calendar.next(anchor, steps).map(format_date)
    }

    /// True iff `date` is exactly a known session.
    #[must_use]
    pub fn is_trading_date(&self, date: &str) -> bool {
        const OP: &str = "is_trading_date";
        let Some(calendar) = self.lookup(OP) else {
            return false;
        };
        let Some(date) = Self::parse_input(OP, "date", date) else {
            return false;
        };
        calendar.contains(date)
    }

    fn lookup(&self, operation: &str) -> Option<&TradingCalendar> {
        if self.calendar.is_none() {
            warn!(operation, "calendar absent; returning degraded result");
        }
        self.calendar.as_ref()
    }

    fn parse_input(operation: &str, role: &str, value: &str) -> Option<NaiveDate> {
        match parse_date(value) {
            Ok(date) => Some(date),
            Err(error) => {
                warn!(operation, %error, "rejecting {role} date; returning degraded result");
                None
            }
        }
    }
}
