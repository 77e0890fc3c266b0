//! Calendar dates used to build query windows.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Wire/storage format of observation dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Anchor for every "previous year" window. Fixed, not wall-clock time.
pub const REFERENCE_DATE: (i32, u32, u32) = (2017, 8, 23);

/// Length of the trailing window ending at the reference date.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Fixed start used by the temperature summary routes in legacy mode.
pub const LEGACY_RANGE_START: (i32, u32, u32) = (2016, 8, 23);

/// Fixed end used by the start/end temperature summary route in legacy mode.
pub const LEGACY_RANGE_END: (i32, u32, u32) = (2017, 8, 23);

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // The constants above are valid calendar dates.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

pub fn reference_date() -> NaiveDate {
    ymd(REFERENCE_DATE)
}

/// Lower bound of the trailing window: `reference_date - 365 days`.
pub fn year_ago() -> NaiveDate {
    reference_date() - Duration::days(TRAILING_WINDOW_DAYS)
}

pub fn legacy_range_start() -> NaiveDate {
    ymd(LEGACY_RANGE_START)
}

pub fn legacy_range_end() -> NaiveDate {
    ymd(LEGACY_RANGE_END)
}

/// Format a date the way the dataset stores it.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
}

/// Date window for temperature aggregation.
///
/// Open-ended when `end` is `None`; otherwise inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn starting(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Whether an ISO date string falls inside the window.
    ///
    /// Compares the strings lexicographically, matching how SQLite compares
    /// the TEXT `date` column against a bound parameter.
    pub fn contains(&self, date: &str) -> bool {
        let start = format_iso_date(self.start);
        if date < start.as_str() {
            return false;
        }
        match self.end {
            Some(end) => date <= format_iso_date(end).as_str(),
            None => true,
        }
    }
}
