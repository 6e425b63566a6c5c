//! Calendar math: month bounds, day bounds and the padded month window.
//!
//! Everything here is pure and works on local calendar days (`NaiveDate`).
//! Month ends are exclusive (the first day of the following month), the
//! padded window end is inclusive (the last day shown in the grid).

use crate::errors::{AppError, AppResult};
use crate::models::window::CalendarWindow;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// First column of the 7-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Single-letter column labels in grid order.
    pub fn labels(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["S", "M", "T", "W", "T", "F", "S"],
            WeekStart::Monday => ["M", "T", "W", "T", "F", "S", "S"],
        }
    }

    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Some(WeekStart::Sunday),
            "monday" | "mon" => Some(WeekStart::Monday),
            _ => None,
        }
    }
}

/// Config values accept "sunday"/"sun" and "monday"/"mon" in any case.
impl<'de> Deserialize<'de> for WeekStart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        WeekStart::from_config_str(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid week_start '{raw}' (expected sunday or monday)"
            ))
        })
    }
}

fn out_of_range(what: &str, d: NaiveDate) -> AppError {
    AppError::InvalidDate(format!("{what} out of calendar range for {d}"))
}

fn add_days(d: NaiveDate, n: u64) -> AppResult<NaiveDate> {
    d.checked_add_days(Days::new(n))
        .ok_or_else(|| out_of_range("date", d))
}

fn sub_days(d: NaiveDate, n: u64) -> AppResult<NaiveDate> {
    d.checked_sub_days(Days::new(n))
        .ok_or_else(|| out_of_range("date", d))
}

/// Strip the time of day.
pub fn normalize(dt: NaiveDateTime) -> NaiveDate {
    dt.date()
}

pub fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// Midnight of the following day (exclusive).
pub fn end_of_day(d: NaiveDate) -> AppResult<NaiveDateTime> {
    Ok(start_of_day(add_days(d, 1)?))
}

pub fn start_of_month(d: NaiveDate) -> NaiveDate {
    // day 1 always exists for a valid year/month
    d.with_day(1).unwrap_or(d)
}

/// First day of the following month (exclusive end).
pub fn end_of_month(d: NaiveDate) -> AppResult<NaiveDate> {
    start_of_month(d)
        .checked_add_months(Months::new(1))
        .ok_or_else(|| out_of_range("end of month", d))
}

pub fn last_day_of_month(d: NaiveDate) -> AppResult<NaiveDate> {
    sub_days(end_of_month(d)?, 1)
}

pub fn start_of_previous_month(d: NaiveDate) -> AppResult<NaiveDate> {
    start_of_month(d)
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| out_of_range("previous month", d))
}

pub fn start_of_next_month(d: NaiveDate) -> AppResult<NaiveDate> {
    end_of_month(d)
}

pub fn number_of_days_in_month(d: NaiveDate) -> AppResult<u32> {
    Ok(last_day_of_month(d)?.day())
}

/// Column of `d` in a grid whose first column is `week_start` (0..=6).
pub fn weekday_index(d: NaiveDate, week_start: WeekStart) -> u32 {
    let day = d.weekday().num_days_from_sunday();
    let first = week_start.weekday().num_days_from_sunday();
    (day + 7 - first) % 7
}

/// First day shown for the month of `d`: the month start pulled back to the
/// week start. Zero prefix days when the month already starts there.
pub fn start_of_calendar_with_prefix_days(
    d: NaiveDate,
    week_start: WeekStart,
) -> AppResult<NaiveDate> {
    let first = start_of_month(d);
    sub_days(first, weekday_index(first, week_start) as u64)
}

/// Last day shown for the month of `d` (inclusive): the last day of the
/// month pushed forward to the week end.
pub fn end_of_calendar_with_suffix_days(
    d: NaiveDate,
    week_start: WeekStart,
) -> AppResult<NaiveDate> {
    let last = last_day_of_month(d)?;
    add_days(last, (6 - weekday_index(last, week_start)) as u64)
}

pub fn window(reference: NaiveDate, week_start: WeekStart) -> AppResult<CalendarWindow> {
    Ok(CalendarWindow {
        reference_date: reference,
        start: start_of_calendar_with_prefix_days(reference, week_start)?,
        end: end_of_calendar_with_suffix_days(reference, week_start)?,
        month_start: start_of_month(reference),
        month_end: end_of_month(reference)?,
    })
}

/// Inclusive list of days between two dates; empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidMonth(s.to_string()))
}
