use crate::calendar;
use crate::errors::{AppError, AppResult};
use chrono::{Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Day argument of `toggle`: `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_day_arg(s: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    match s.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        _ => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

fn invalid(r: &str) -> AppError {
    AppError::InvalidDate(format!("unsupported period '{r}'"))
}

/// Bounds of one period token: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn token_bounds(t: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let t = t.trim();
    match t.len() {
        4 => {
            let y: i32 = t.parse().map_err(|_| invalid(t))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(t))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(t))?;
            Ok((first, last))
        }
        7 => {
            let first = calendar::parse_month(t)?;
            Ok((first, calendar::last_day_of_month(first)?))
        }
        10 => {
            let d = parse_date(t).ok_or_else(|| invalid(t))?;
            Ok((d, d))
        }
        _ => Err(invalid(t)),
    }
}

/// Parse a period filter into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by ':' (same format on both sides)
pub fn parse_period(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        if start_raw.trim().len() != end_raw.trim().len() {
            return Err(AppError::InvalidDate(
                "start and end must have same format".into(),
            ));
        }

        let (start, _) = token_bounds(start_raw)?;
        let (_, end) = token_bounds(end_raw)?;

        if start > end {
            return Err(AppError::InvalidDate(format!("empty period '{r}'")));
        }
        return Ok((start, end));
    }

    token_bounds(r)
}

/// Bounds of the month containing `d`.
pub fn month_bounds(d: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    Ok((
        calendar::start_of_month(d),
        calendar::last_day_of_month(d)?,
    ))
}
