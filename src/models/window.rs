use crate::calendar::days_between;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The padded range of days needed to draw one month as whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarWindow {
    pub reference_date: NaiveDate,
    /// First displayed day, always a week start.
    pub start: NaiveDate,
    /// Last displayed day (inclusive), always a week end.
    pub end: NaiveDate,
    pub month_start: NaiveDate,
    /// First day of the following month (exclusive).
    pub month_end: NaiveDate,
}

impl CalendarWindow {
    pub fn days(&self) -> Vec<NaiveDate> {
        days_between(self.start, self.end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn weeks(&self) -> i64 {
        self.len_days() / 7
    }

    /// True for days of the viewed month, false for padding days.
    pub fn is_in_month(&self, d: NaiveDate) -> bool {
        self.month_start <= d && d < self.month_end
    }

    pub fn title(&self) -> String {
        format!(
            "{} {}",
            self.month_start.format("%B"),
            self.month_start.year()
        )
    }
}
