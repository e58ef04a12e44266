//! The bookable date window and time formatting helpers.

use chrono::{Duration, Local, NaiveDate};

use crate::error::CoreError;

/// Days bookable beyond tomorrow. Today is never bookable.
pub const BOOKING_WINDOW_DAYS: i64 = 7;

/// Inclusive range of dates a student may book, anchored on "today".
///
/// Construct with [`BookingWindow::current`] in the app and with
/// [`BookingWindow::around`] in tests, where the anchor is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    first: NaiveDate,
    last: NaiveDate,
}

impl BookingWindow {
    pub fn around(today: NaiveDate) -> Self {
        let first = today + Duration::days(1);
        Self {
            first,
            last: first + Duration::days(BOOKING_WINDOW_DAYS),
        }
    }

    pub fn current() -> Self {
        Self::around(Local::now().date_naive())
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    pub fn validate(&self, date: NaiveDate) -> Result<(), CoreError> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(CoreError::DateOutOfRange {
                date,
                first: self.first,
                last: self.last,
            })
        }
    }

    /// Every selectable date, earliest first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first;
        (0..=BOOKING_WINDOW_DAYS).map(move |offset| first + Duration::days(offset))
    }
}

/// Trims wire times like `08:00:00` down to `08:00` for display.
pub fn display_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

/// Row key for the slot grid, e.g. `08:00 - 09:00`. Lexicographic order
/// on these keys is chronological because hours are zero-padded.
pub fn time_range_key(start: &str, end: &str) -> String {
    format!("{} - {}", display_time(start), display_time(end))
}
